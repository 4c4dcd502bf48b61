pub mod candidates;
pub mod providers;
pub mod recommendations;
pub mod scoring;
