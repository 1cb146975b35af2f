//! Facet extraction for the filter panel.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::VideoRecord;

/// Distinct filterable values present in the current catalog.
///
/// Values appear in the order they are first seen, so the same catalog
/// always yields the same facet list. Empty values are kept; whether to
/// show them is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FacetOptions {
    pub schools: Vec<String>,
    pub tags: Vec<String>,
}

impl FacetOptions {
    pub fn is_empty(&self) -> bool {
        self.schools.is_empty() && self.tags.is_empty()
    }
}

/// Derive distinct schools and the union of all tags.
pub fn extract_facets(videos: &[VideoRecord]) -> FacetOptions {
    let mut seen_schools = HashSet::new();
    let mut seen_tags = HashSet::new();
    let mut facets = FacetOptions::default();

    for video in videos {
        let school = video.metadata.school.as_str();
        if seen_schools.insert(school) {
            facets.schools.push(school.to_string());
        }

        for tag in &video.metadata.tags {
            if seen_tags.insert(tag.as_str()) {
                facets.tags.push(tag.clone());
            }
        }
    }

    facets
}
