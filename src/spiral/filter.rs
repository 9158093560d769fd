//! Filter stage: reduce a batch of points to those matching the current
//! stage, layer, and tag-substring selectors.
//!
//! Filtering is a pure function with no error conditions. Retained points
//! keep their relative input order, so the output is always a subsequence of
//! the input and filtering is idempotent.

use serde::{Deserialize, Serialize};

use crate::point::{Layer, MemoryPoint, Stage};

/// Stage selector: a specific stage, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageFilter {
    #[default]
    Both,
    Only(Stage),
}

impl StageFilter {
    fn admits(self, stage: Stage) -> bool {
        match self {
            Self::Both => true,
            Self::Only(s) => s == stage,
        }
    }

    /// Cycle Both -> Interpret -> Reflect -> Both (TUI keybinding).
    pub fn cycle(self) -> Self {
        match self {
            Self::Both => Self::Only(Stage::Interpret),
            Self::Only(Stage::Interpret) => Self::Only(Stage::Reflect),
            Self::Only(Stage::Reflect) => Self::Both,
        }
    }
}

impl std::fmt::Display for StageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::Only(s) => write!(f, "{s}"),
        }
    }
}

/// Layer selector: a specific layer, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerFilter {
    #[default]
    Both,
    Only(Layer),
}

impl LayerFilter {
    fn admits(self, layer: Layer) -> bool {
        match self {
            Self::Both => true,
            Self::Only(l) => l == layer,
        }
    }

    /// Cycle Both -> Raw -> Truth -> Both (TUI keybinding).
    pub fn cycle(self) -> Self {
        match self {
            Self::Both => Self::Only(Layer::Raw),
            Self::Only(Layer::Raw) => Self::Only(Layer::Truth),
            Self::Only(Layer::Truth) => Self::Both,
        }
    }
}

impl std::fmt::Display for LayerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::Only(l) => write!(f, "{l}"),
        }
    }
}

/// How the tag substring is matched. Case-sensitive is the default; the
/// insensitive variant is the documented tunable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCase {
    #[default]
    Sensitive,
    Insensitive,
}

/// The complete filter selector triple (plus the tag-case tunable).
///
/// Created with defaults at view-mount time and replaced wholesale on each
/// user edit; the engine never merges partial updates itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub stage: StageFilter,
    pub layer: LayerFilter,
    /// Substring that must appear in at least one of a point's tags.
    /// Empty means "no tag constraint".
    pub tag: String,
    #[serde(default)]
    pub tag_case: TagCase,
}

impl FilterState {
    fn tag_matches(&self, point: &MemoryPoint) -> bool {
        if self.tag.is_empty() {
            return true;
        }
        match self.tag_case {
            TagCase::Sensitive => point.tags().iter().any(|t| t.contains(&self.tag)),
            TagCase::Insensitive => {
                let needle = self.tag.to_lowercase();
                point.tags().iter().any(|t| t.to_lowercase().contains(&needle))
            }
        }
    }

    /// Whether a single point passes all three predicates.
    pub fn admits(&self, point: &MemoryPoint) -> bool {
        self.stage.admits(point.stage) && self.layer.admits(point.layer) && self.tag_matches(point)
    }
}

/// Retain the points matching `state`, preserving input order.
pub fn filter(points: &[MemoryPoint], state: &FilterState) -> Vec<MemoryPoint> {
    points.iter().filter(|p| state.admits(p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointMeta;
    use chrono::{TimeZone, Utc};

    fn tagged(id: &str, stage: Stage, layer: Layer, tags: &[&str]) -> MemoryPoint {
        MemoryPoint {
            id: id.into(),
            summary: String::new(),
            timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            gravity_score: 1.0,
            stage,
            layer,
            meta: PointMeta {
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        }
    }

    #[test]
    fn default_state_retains_everything() {
        let points = vec![
            tagged("1", Stage::Interpret, Layer::Raw, &[]),
            tagged("2", Stage::Reflect, Layer::Truth, &["alpha"]),
        ];
        let out = filter(&points, &FilterState::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn stage_selector_narrows() {
        let points = vec![
            tagged("1", Stage::Interpret, Layer::Raw, &[]),
            tagged("2", Stage::Reflect, Layer::Raw, &[]),
        ];
        let state = FilterState {
            stage: StageFilter::Only(Stage::Interpret),
            ..FilterState::default()
        };
        let out = filter(&points, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn layer_selector_narrows() {
        let points = vec![
            tagged("1", Stage::Interpret, Layer::Raw, &[]),
            tagged("2", Stage::Interpret, Layer::Truth, &[]),
        ];
        let state = FilterState {
            layer: LayerFilter::Only(Layer::Truth),
            ..FilterState::default()
        };
        let out = filter(&points, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "2");
    }

    #[test]
    fn tag_substring_matches() {
        let points = vec![tagged("1", Stage::Interpret, Layer::Raw, &["alpha"])];
        let hit = FilterState {
            tag: "alp".into(),
            ..FilterState::default()
        };
        let miss = FilterState {
            tag: "zzz".into(),
            ..FilterState::default()
        };
        assert_eq!(filter(&points, &hit).len(), 1);
        assert_eq!(filter(&points, &miss).len(), 0);
    }

    #[test]
    fn tag_match_is_case_sensitive_by_default() {
        let points = vec![tagged("1", Stage::Interpret, Layer::Raw, &["Alpha"])];
        let state = FilterState {
            tag: "alp".into(),
            ..FilterState::default()
        };
        assert_eq!(filter(&points, &state).len(), 0);
    }

    #[test]
    fn insensitive_tunable_ignores_case() {
        let points = vec![tagged("1", Stage::Interpret, Layer::Raw, &["Alpha"])];
        let state = FilterState {
            tag: "ALP".into(),
            tag_case: TagCase::Insensitive,
            ..FilterState::default()
        };
        assert_eq!(filter(&points, &state).len(), 1);
    }

    #[test]
    fn absent_tags_fail_nonempty_tag_predicate() {
        let points = vec![tagged("1", Stage::Interpret, Layer::Raw, &[])];
        let state = FilterState {
            tag: "a".into(),
            ..FilterState::default()
        };
        assert!(filter(&points, &state).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let points = vec![
            tagged("1", Stage::Interpret, Layer::Raw, &["alpha"]),
            tagged("2", Stage::Reflect, Layer::Truth, &["beta"]),
            tagged("3", Stage::Reflect, Layer::Raw, &[]),
        ];
        let state = FilterState {
            stage: StageFilter::Only(Stage::Reflect),
            tag: "bet".into(),
            ..FilterState::default()
        };
        let once = filter(&points, &state);
        let twice = filter(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn output_is_an_order_preserving_subsequence() {
        let points = vec![
            tagged("1", Stage::Interpret, Layer::Raw, &[]),
            tagged("2", Stage::Reflect, Layer::Raw, &[]),
            tagged("3", Stage::Interpret, Layer::Raw, &[]),
            tagged("4", Stage::Reflect, Layer::Raw, &[]),
        ];
        let state = FilterState {
            stage: StageFilter::Only(Stage::Reflect),
            ..FilterState::default()
        };
        let ids: Vec<_> = filter(&points, &state).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["2", "4"]);
    }

    #[test]
    fn selector_cycles_wrap_around() {
        let mut s = StageFilter::Both;
        for _ in 0..3 {
            s = s.cycle();
        }
        assert_eq!(s, StageFilter::Both);

        let mut l = LayerFilter::Both;
        for _ in 0..3 {
            l = l.cycle();
        }
        assert_eq!(l, LayerFilter::Both);
    }
}
