//! Filter state and optimistic likes.

use super::filter::{filter_by_query, filter_by_tags};
use super::sort::sort_programs;
use dagskra_types::{LikeAction, Program, SortBy};
use serde::{Deserialize, Serialize};

/// Run the full pipeline: tag filter, then query filter, then sort.
pub fn apply_filters<'a>(
    programs: &'a [Program],
    selected_tags: &[String],
    query: &str,
    sort_by: SortBy,
) -> Vec<&'a Program> {
    let tagged = filter_by_tags(programs, selected_tags);
    let matched = filter_by_query(tagged, query);
    sort_programs(matched, sort_by)
}

/// Current filter selections for a program listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub selected_tags: Vec<String>,

    #[serde(default)]
    pub sort_by: SortBy,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered and sorted view of `programs`
    pub fn apply<'a>(&self, programs: &'a [Program]) -> Vec<&'a Program> {
        apply_filters(programs, &self.selected_tags, &self.query, self.sort_by)
    }

    /// Select a tag, or deselect it if already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    /// Clear the query and tag selection. The sort order is kept.
    pub fn clear(&mut self) {
        self.selected_tags.clear();
        self.query.clear();
    }

    pub fn is_filtering(&self) -> bool {
        !self.query.trim().is_empty() || !self.selected_tags.is_empty()
    }
}

/// Locally tracked like state for a single program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    pub like_count: i64,
    pub liked: bool,
}

impl LikeState {
    pub fn new(like_count: i64) -> Self {
        Self {
            like_count,
            liked: false,
        }
    }

    /// Flip the like optimistically and return the action to send upstream
    pub fn toggle(&mut self) -> LikeAction {
        if self.liked {
            self.liked = false;
            self.like_count = (self.like_count - 1).max(0);
            LikeAction::Unlike
        } else {
            self.liked = true;
            self.like_count += 1;
            LikeAction::Like
        }
    }

    /// Replace local state with what the backend confirmed
    pub fn reconcile(&mut self, liked: bool, like_count: i64) {
        self.liked = liked;
        self.like_count = like_count;
    }
}
