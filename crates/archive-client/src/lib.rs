//! Client for the video archive REST backend.
//!
//! This crate provides:
//! - Catalog listing and multipart uploads (single videos or ZIP archives)
//! - The Google sign-in handshake (authorization URL, code exchange)
//! - A file-backed session store for the signed-in account

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::{ArchiveClient, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;

#[cfg(test)]
mod client_tests;
