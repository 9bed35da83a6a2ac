pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod planner;
pub mod replacer;
pub mod settings;
pub mod ui;
pub mod warning;
pub mod worktree;

pub use error::{Result, UpversionError};
