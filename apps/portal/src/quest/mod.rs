//! Developer Quest: the gamified application wizard.

pub mod catalog;
pub mod handlers;
pub mod scoring;
pub mod submission;
pub mod wizard;
