//! Shared types for dagskra
//!
//! This crate provides the records exchanged with the program bank backend:
//! programs, their author and workspace references, sort options and partial
//! updates.

use serde::{Deserialize, Serialize};

/// Program identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub String);

impl ProgramId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProgramId {
    fn from(id: &str) -> Self {
        ProgramId(id.to_string())
    }
}

/// Author of a program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramAuthor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Workspace (troop, unit) a program was created under
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub id: String,
    pub name: String,
}

/// A single activity record in the program bank.
///
/// Optional fields are normalized at the serde boundary: missing `tags`
/// decode to an empty list and a missing `like_count` decodes to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub public: bool,

    #[serde(default)]
    pub like_count: i64,

    /// ISO timestamp as sent by the backend
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub author: ProgramAuthor,

    #[serde(default)]
    pub workspace: WorkspaceRef,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u32>,
}

impl Program {
    /// Description with `None` read as the empty string
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Program list as returned by the backend: either a bare array or an
/// object wrapping it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProgramsResponse {
    List(Vec<Program>),
    Wrapped {
        #[serde(default)]
        programs: Vec<Program>,
    },
}

impl ProgramsResponse {
    pub fn into_programs(self) -> Vec<Program> {
        match self {
            ProgramsResponse::List(programs) => programs,
            ProgramsResponse::Wrapped { programs } => programs,
        }
    }
}

/// Sort order for program listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    MostLiked,
    Alphabetical,
}

impl SortBy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Some(SortBy::Newest),
            "oldest" => Some(SortBy::Oldest),
            "most-liked" => Some(SortBy::MostLiked),
            "alphabetical" => Some(SortBy::Alphabetical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::MostLiked => "most-liked",
            SortBy::Alphabetical => "alphabetical",
        }
    }
}

/// Partial update of a program. Only the fields that are `Some` replace
/// the stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProgramUpdate {
    /// Return a copy of `program` with this update applied.
    ///
    /// Text fields are trimmed; a blank description or image clears it.
    pub fn apply_to(&self, program: &Program) -> Program {
        let mut updated = program.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            updated.description = non_blank(description);
        }
        if let Some(public) = self.public {
            updated.public = public;
        }
        if let Some(image) = &self.image {
            updated.image = non_blank(image);
        }
        if let Some(tags) = &self.tags {
            updated.tags = tags.clone();
        }
        updated
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.public.is_none()
            && self.image.is_none()
            && self.tags.is_none()
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Like action sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Like,
    Unlike,
}
