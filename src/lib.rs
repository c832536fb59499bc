pub mod analyzer;
pub mod boundary;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod merge;
pub mod output;
pub mod ui;
pub mod version;

pub use error::{Result, TimelineError};
