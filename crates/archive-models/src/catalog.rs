//! Browse state for the catalog page.
//!
//! `CatalogView` holds a fetched snapshot, the active criteria and the
//! derived views. Every event is applied and recomputed synchronously, so
//! there is no pending state between an input and its result.

use crate::facets::{extract_facets, FacetOptions};
use crate::filter::{matches_normalized, FilterCriteria};
use crate::video::VideoRecord;

const NO_MATCHES: &str = "No videos match your search.";
const NO_VIDEOS: &str = "No videos uploaded yet.";

/// Discrete user interactions on the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// Search box changed
    SetQuery(String),
    /// School chip clicked
    ToggleSchool(String),
    /// Tag chip clicked
    ToggleTag(String),
    /// Clear every constraint
    Reset,
    /// A fresh list arrived from the backend
    Replace(Vec<VideoRecord>),
}

#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    videos: Vec<VideoRecord>,
    criteria: FilterCriteria,
    facets: FacetOptions,
    visible: Vec<usize>,
}

impl CatalogView {
    pub fn new(videos: Vec<VideoRecord>) -> Self {
        Self::with_criteria(videos, FilterCriteria::default())
    }

    pub fn with_criteria(videos: Vec<VideoRecord>, criteria: FilterCriteria) -> Self {
        let mut view = Self {
            videos,
            criteria,
            facets: FacetOptions::default(),
            visible: Vec::new(),
        };
        view.refresh_facets();
        view.refresh_visible();
        view
    }

    /// Apply an event and recompute the affected views.
    pub fn apply(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::SetQuery(query) => self.criteria.set_query(query),
            CatalogEvent::ToggleSchool(school) => {
                self.criteria.toggle_school(&school);
            }
            CatalogEvent::ToggleTag(tag) => {
                self.criteria.toggle_tag(&tag);
            }
            CatalogEvent::Reset => self.criteria = FilterCriteria::default(),
            CatalogEvent::Replace(videos) => {
                self.videos = videos;
                self.refresh_facets();
            }
        }
        self.refresh_visible();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    pub fn all(&self) -> &[VideoRecord] {
        &self.videos
    }

    /// Records that pass the current criteria, in catalog order.
    pub fn visible(&self) -> impl Iterator<Item = &VideoRecord> + '_ {
        self.visible.iter().map(|&i| &self.videos[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Placeholder text when nothing is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.visible.is_empty() {
            return None;
        }
        if self.criteria.is_empty() {
            Some(NO_VIDEOS)
        } else {
            Some(NO_MATCHES)
        }
    }

    fn refresh_facets(&mut self) {
        self.facets = extract_facets(&self.videos);
    }

    fn refresh_visible(&mut self) {
        let query = self.criteria.normalized_query();
        self.visible = self
            .videos
            .iter()
            .enumerate()
            .filter(|(_, video)| matches_normalized(video, &self.criteria, query.as_deref()))
            .map(|(i, _)| i)
            .collect();
    }
}
