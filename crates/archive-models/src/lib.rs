//! Shared data models for the video archive.
//!
//! This crate provides Serde-serializable types for:
//! - Video records and their metadata
//! - Filter criteria and facet options for browsing the catalog
//! - Upload forms and Google sign-in payloads
//!
//! Everything here is pure: no I/O, no async. Filtering and facet
//! extraction run to completion on a snapshot of the catalog.

pub mod auth;
pub mod catalog;
pub mod facets;
pub mod filter;
pub mod upload;
pub mod video;

// Re-export common types
pub use auth::{extract_auth_code, AuthCodeError, AuthUrlResponse, GoogleCallbackRequest, GoogleUser, Session};
pub use catalog::{CatalogEvent, CatalogView};
pub use facets::{extract_facets, FacetOptions};
pub use filter::{filter_videos, matches, FilterCriteria};
pub use upload::{parse_tags, UploadError, UploadForm, UploadKind};
pub use video::{VideoId, VideoMetadata, VideoRecord};
