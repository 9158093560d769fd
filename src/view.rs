//! View-side state for the fetch/refresh cycle.
//!
//! Each panel owns a small state machine: `Loading` while a request is
//! outstanding, `Ready` with data, or `Failed` with a display message. A
//! request superseded by a newer one must not apply its result after the
//! newer request starts; that is enforced with a monotonically increasing
//! [`RequestSeq`] compared at completion time, never by aborting transport.

use crate::point::MemoryPoint;
use crate::spiral::{self, FilterState, LayoutConfig, PositionedPoint, Selection};

/// Monotonically increasing request identifier for stale-response
/// suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestSeq(pub u64);

/// Lifecycle of a panel's single fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Data arrived.
    Ready,
    /// The fetch failed; the message is display-only. Failures are terminal
    /// for the attempt — recovery only via a new triggering change.
    Failed(String),
}

/// Generic panel data holder: data plus fetch lifecycle plus the sequence
/// counter that guards against stale completions.
#[derive(Debug, Clone, Default)]
pub struct PanelState<T> {
    pub state: FetchState,
    pub data: T,
    latest_seq: u64,
}

impl<T: Default> PanelState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new logical request: bumps the sequence and enters `Loading`.
    /// Any prior in-flight request is thereby logically cancelled.
    pub fn begin_fetch(&mut self) -> RequestSeq {
        self.latest_seq += 1;
        self.state = FetchState::Loading;
        RequestSeq(self.latest_seq)
    }

    /// Apply a completion. Returns `false` (and changes nothing) when the
    /// completion belongs to a superseded request.
    pub fn complete_fetch(&mut self, seq: RequestSeq, result: Result<T, String>) -> bool {
        if seq.0 != self.latest_seq {
            tracing::debug!(got = seq.0, latest = self.latest_seq, "discarding stale response");
            return false;
        }
        match result {
            Ok(data) => {
                self.data = data;
                self.state = FetchState::Ready;
            }
            Err(message) => {
                // A failed fetch discards any previous data.
                self.data = T::default();
                self.state = FetchState::Failed(message);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }
}

/// State for the spiral panel: the fetched points, the filter state, the
/// selection, and the layout geometry.
///
/// Points are owned exclusively by this view; filter and selection are
/// owned here too and are disjoint from each other.
#[derive(Debug, Clone, Default)]
pub struct SpiralViewModel {
    pub panel: PanelState<Vec<MemoryPoint>>,
    pub filter: FilterState,
    pub selection: Selection,
    pub layout: LayoutConfig,
}

impl SpiralViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> RequestSeq {
        self.panel.begin_fetch()
    }

    pub fn complete_fetch(
        &mut self,
        seq: RequestSeq,
        result: Result<Vec<MemoryPoint>, String>,
    ) -> bool {
        self.panel.complete_fetch(seq, result)
    }

    /// Replace the filter state wholesale (partial merges are the caller's
    /// business, never the engine's).
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Run filter → order → layout over the current batch.
    pub fn positioned(&self) -> Vec<PositionedPoint> {
        spiral::pipeline(&self.panel.data, &self.filter, &self.layout)
    }

    /// Select the point `steps` after (or before, negative) the currently
    /// selected one in the positioned sequence; selects the first point when
    /// nothing is selected. No-op on an empty view.
    pub fn move_selection(&mut self, steps: isize) {
        let positioned = self.positioned();
        if positioned.is_empty() {
            return;
        }
        let current = self
            .selection
            .selected_id()
            .and_then(|id| positioned.iter().position(|p| p.point.id == id));
        let next = match current {
            Some(i) => (i as isize + steps).rem_euclid(positioned.len() as isize) as usize,
            None => 0,
        };
        self.selection.select(positioned[next].point.id.clone());
    }

    /// The positioned point currently selected, if it survives the filter.
    pub fn selected_point(&self) -> Option<PositionedPoint> {
        let id = self.selection.selected_id()?;
        self.positioned().into_iter().find(|p| p.point.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Layer, PointMeta, Stage};
    use crate::spiral::StageFilter;
    use chrono::{TimeZone, Utc};

    fn point(id: &str, day: u32) -> MemoryPoint {
        MemoryPoint {
            id: id.into(),
            summary: String::new(),
            timestamp: Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap(),
            gravity_score: 2.0,
            stage: Stage::Interpret,
            layer: Layer::Raw,
            meta: PointMeta::default(),
        }
    }

    #[test]
    fn begin_fetch_enters_loading() {
        let mut vm = SpiralViewModel::new();
        assert_eq!(vm.panel.state, FetchState::Idle);
        vm.begin_fetch();
        assert!(vm.panel.is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut vm = SpiralViewModel::new();
        let first = vm.begin_fetch();
        let second = vm.begin_fetch();

        // The superseded request completes late; it must not apply.
        assert!(!vm.complete_fetch(first, Ok(vec![point("stale", 1)])));
        assert!(vm.panel.is_loading());

        assert!(vm.complete_fetch(second, Ok(vec![point("fresh", 1)])));
        assert_eq!(vm.panel.state, FetchState::Ready);
        assert_eq!(vm.panel.data[0].id, "fresh");
    }

    #[test]
    fn failure_discards_previous_points() {
        let mut vm = SpiralViewModel::new();
        let seq = vm.begin_fetch();
        vm.complete_fetch(seq, Ok(vec![point("a", 1)]));
        assert_eq!(vm.panel.data.len(), 1);

        let seq = vm.begin_fetch();
        vm.complete_fetch(seq, Err("connection refused".into()));
        assert_eq!(vm.panel.state, FetchState::Failed("connection refused".into()));
        assert!(vm.panel.data.is_empty());
        assert!(vm.positioned().is_empty());
    }

    #[test]
    fn selection_survives_refilter_with_no_effect() {
        let mut vm = SpiralViewModel::new();
        let seq = vm.begin_fetch();
        vm.complete_fetch(seq, Ok(vec![point("a", 1), point("b", 2)]));
        vm.selection.select("a");

        // Refilter so that "a" disappears (Interpret points, filter Reflect).
        vm.set_filter(FilterState {
            stage: StageFilter::Only(Stage::Reflect),
            ..FilterState::default()
        });
        assert!(vm.positioned().is_empty());
        // Still selected, just invisible.
        assert!(vm.selection.is_selected("a"));
        assert!(vm.selected_point().is_none());
    }

    #[test]
    fn selecting_absent_id_does_not_change_pipeline_output() {
        let mut vm = SpiralViewModel::new();
        let seq = vm.begin_fetch();
        vm.complete_fetch(seq, Ok(vec![point("a", 1), point("b", 2)]));

        let before = vm.positioned();
        vm.selection.select("no-such-id");
        let after = vm.positioned();
        assert_eq!(before, after);
    }

    #[test]
    fn move_selection_cycles_through_positioned_points() {
        let mut vm = SpiralViewModel::new();
        let seq = vm.begin_fetch();
        vm.complete_fetch(seq, Ok(vec![point("a", 1), point("b", 2), point("c", 3)]));

        vm.move_selection(1);
        assert!(vm.selection.is_selected("a"));
        vm.move_selection(1);
        assert!(vm.selection.is_selected("b"));
        vm.move_selection(-2);
        assert!(vm.selection.is_selected("c")); // wraps backwards
    }
}
