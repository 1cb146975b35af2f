//! Catalog filter engine.
//!
//! A record is visible when it passes all three predicates:
//! - text: the lowercased query is a substring of the title, the
//!   description or any tag (school is not searched)
//! - school: no school selected, or the record's school is selected
//! - tag: no tag selected, or at least one of the record's tags is selected
//!
//! Filtering is stable: matching records keep their input order.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::VideoRecord;

/// Active search and facet selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCriteria {
    /// Free-text query (case-insensitive substring)
    #[serde(default)]
    pub query: String,

    /// Selected schools
    #[serde(default)]
    pub schools: BTreeSet<String>,

    /// Selected tags
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_schools<I, S>(mut self, schools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schools = schools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Flip a school's selection. Returns whether it is now selected.
    pub fn toggle_school(&mut self, school: &str) -> bool {
        toggle(&mut self.schools, school)
    }

    /// Flip a tag's selection. Returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        toggle(&mut self.tags, tag)
    }

    /// Number of selected facet values (the badge on the filter toggle).
    pub fn active_filter_count(&self) -> usize {
        self.schools.len() + self.tags.len()
    }

    /// Normalized query, or `None` when the query imposes no constraint.
    pub fn normalized_query(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            None
        } else {
            Some(self.query.to_lowercase())
        }
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.normalized_query().is_none() && self.schools.is_empty() && self.tags.is_empty()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}

/// Check a single record against the criteria.
pub fn matches(video: &VideoRecord, criteria: &FilterCriteria) -> bool {
    let query = criteria.normalized_query();
    matches_normalized(video, criteria, query.as_deref())
}

/// Stable filter over the catalog.
pub fn filter_videos<'a>(videos: &'a [VideoRecord], criteria: &FilterCriteria) -> Vec<&'a VideoRecord> {
    // Lowercase the query once rather than per record
    let query = criteria.normalized_query();
    videos
        .iter()
        .filter(|video| matches_normalized(video, criteria, query.as_deref()))
        .collect()
}

/// Like [`matches`], with the query already run through
/// [`FilterCriteria::normalized_query`].
pub(crate) fn matches_normalized(
    video: &VideoRecord,
    criteria: &FilterCriteria,
    query: Option<&str>,
) -> bool {
    text_matches(video, query)
        && school_matches(video, &criteria.schools)
        && tag_matches(video, &criteria.tags)
}

fn text_matches(video: &VideoRecord, query: Option<&str>) -> bool {
    let Some(query) = query else {
        return true;
    };

    let meta = &video.metadata;
    meta.title.to_lowercase().contains(query)
        || meta.description.to_lowercase().contains(query)
        || meta.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

fn school_matches(video: &VideoRecord, schools: &BTreeSet<String>) -> bool {
    schools.is_empty() || schools.contains(&video.metadata.school)
}

fn tag_matches(video: &VideoRecord, tags: &BTreeSet<String>) -> bool {
    tags.is_empty() || video.metadata.tags.iter().any(|tag| tags.contains(tag))
}
