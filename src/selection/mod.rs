pub mod boundaries;
pub mod candidates;
pub mod scoring;
pub mod selector;
pub mod speakers;
