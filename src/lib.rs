//! # well-portal
//!
//! Terminal dashboard for a monitored well: a radial timeline of memory
//! points ("spiral view"), a question-answering chat panel, a document
//! search panel, and a summary overview panel. All data comes from a remote
//! backend over four JSON-over-HTTP endpoints; the portal only filters,
//! sorts, and renders what it receives.
//!
//! ## Architecture
//!
//! - **Spiral engine** (`spiral`): pure filter → order → layout pipeline
//!   plus selection state. No I/O, deterministic, the reusable core.
//! - **API client** (`api`): sync `ureq` client for the four endpoints,
//!   with explicit optional-field defaults at the boundary.
//! - **View state** (`view`): per-panel fetch lifecycle with
//!   request-sequence stale-response suppression.
//! - **TUI** (`tui`): ratatui dashboard wiring the panels together.
//!
//! ## Library usage
//!
//! ```
//! use well_portal::spiral::{self, FilterState, LayoutConfig};
//!
//! let points = vec![]; // normally fetched via api::PortalClient
//! let positioned = spiral::pipeline(&points, &FilterState::default(), &LayoutConfig::default());
//! assert!(positioned.is_empty());
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod message;
pub mod paths;
pub mod point;
pub mod spiral;
pub mod tui;
pub mod view;
