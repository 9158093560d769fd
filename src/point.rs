//! Memory point data model: the unit of visualization on the spiral.
//!
//! A `MemoryPoint` is one timestamped, scored, tagged record produced by the
//! interpret/reflect backend for a well. Points arrive over the wire as JSON
//! and are parsed here, at the boundary — optional fields take their defaults
//! in this module so the rendering code never has to deal with absence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which processing phase produced the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// First-pass interpretation of a source document.
    Interpret,
    /// Recursive reflection over already-interpreted material.
    Reflect,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interpret => write!(f, "interpret"),
            Self::Reflect => write!(f, "reflect"),
        }
    }
}

/// Provenance depth of the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Taken directly from a source document.
    Raw,
    /// Derived ("anchored truth") after validation.
    Truth,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Truth => write!(f, "truth"),
        }
    }
}

/// Free-form metadata attached to a point. Only `tags` is consumed; the
/// backend may send more keys and we let serde drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMeta {
    /// Short labels used for substring filtering. Absent on the wire means
    /// empty here.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One timestamped, scored observation to be plotted on the spiral.
///
/// `id` is unique within a fetched batch but batches from different fetches
/// are not required to be consistent — a later fetch may silently replace
/// all points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPoint {
    pub id: String,
    pub summary: String,
    /// RFC 3339 on the wire. A timestamp that fails to parse fails the whole
    /// fetch rather than producing an undefined sort order.
    pub timestamp: DateTime<Utc>,
    pub gravity_score: f64,
    pub stage: Stage,
    pub layer: Layer,
    #[serde(default)]
    pub meta: PointMeta,
}

impl MemoryPoint {
    /// Tags attached to this point (empty slice when the backend sent none).
    pub fn tags(&self) -> &[String] {
        &self.meta.tags
    }
}
