//! The spiral engine: filter → order → layout, plus selection state.
//!
//! This is the pure core of the portal. Given a batch of memory points it
//! produces a filtered, time-ordered, positioned set of renderable points.
//! No I/O, no hidden state: the caller re-invokes [`pipeline`] whenever the
//! point list or the filter state changes.

pub mod filter;
pub mod layout;
pub mod selection;

pub use filter::{FilterState, LayerFilter, StageFilter, TagCase};
pub use layout::{LayoutConfig, PositionedPoint, layout, order};
pub use selection::Selection;

use crate::point::MemoryPoint;

/// Run the full pipeline: filter, then stable time order, then polar layout.
pub fn pipeline(
    points: &[MemoryPoint],
    state: &FilterState,
    config: &LayoutConfig,
) -> Vec<PositionedPoint> {
    let retained = filter::filter(points, state);
    let ordered = layout::order(retained);
    layout::layout(&ordered, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Layer, MemoryPoint, PointMeta, Stage};
    use chrono::{TimeZone, Utc};

    fn point(id: &str, day: u32, stage: Stage) -> MemoryPoint {
        MemoryPoint {
            id: id.into(),
            summary: format!("point {id}"),
            timestamp: Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap(),
            gravity_score: 3.0,
            stage,
            layer: Layer::Raw,
            meta: PointMeta::default(),
        }
    }

    #[test]
    fn pipeline_filters_orders_and_positions() {
        // Deliberately out of time order.
        let points = vec![
            point("b", 2, Stage::Reflect),
            point("a", 1, Stage::Interpret),
            point("c", 3, Stage::Interpret),
        ];
        let state = FilterState {
            stage: StageFilter::Only(Stage::Interpret),
            ..FilterState::default()
        };
        let out = pipeline(&points, &state, &LayoutConfig::default());
        let ids: Vec<_> = out.iter().map(|p| p.point.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        // Index 0 sits at angle 0: y == center.
        let cfg = LayoutConfig::default();
        assert!((out[0].y - cfg.center()).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = pipeline(&[], &FilterState::default(), &LayoutConfig::default());
        assert!(out.is_empty());
    }
}
