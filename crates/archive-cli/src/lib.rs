//! Terminal front-end for the video archive.
//!
//! Mirrors the archive's web pages: browse and search the catalog,
//! list the available filters, upload videos, and sign in with Google.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

pub use cli::{Cli, Command};
pub use config::{CliConfig, LogFormat};
