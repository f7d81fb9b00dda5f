//! folio — a themed, custom-drawn tabbed notebook control.
//!
//! The crate owns the whole tab-strip pipeline: incremental layout of
//! variable-width tabs, pointer-driven selection/close/drag-reorder, and a
//! paint routine that stays pixel-consistent with the layout.  Text
//! measurement, icon decoding and window plumbing are external services
//! supplied by the host (see [`render::TextMeasure`] and the
//! `folio-gallery` binary for a softbuffer-based host).

pub mod core;
pub mod notebook;
pub mod render;
pub mod style;

pub use crate::core::{Color, Rect};
pub use notebook::{ContentId, Icon, Notebook, NotebookObserver, Page};
pub use render::{Canvas, TextMeasure, TextSize};
pub use style::{Style, StyleChange, Theme};
