pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod reconcile;
pub mod ui;

pub use error::{ReleaseSyncError, Result};
