//! Visit Report Common Library
//!
//! Core logic shared by the CLI renderer and the tests:
//! - types: visit/photo records exchanged as JSON with the upstream app
//! - organizer: check-in / others-by-time / check-out photo ordering
//! - grouping: date filtering, chronological sort, per-store grouping
//! - layout: fixed 2-column grid math and the page-break cursor
//! - canvas: drawing abstraction the PDF backend implements

pub mod canvas;
pub mod error;
pub mod grouping;
pub mod layout;
pub mod organizer;
pub mod types;
pub mod url_check;

pub use canvas::{Canvas, CanvasOp, FontStyle, RecordingCanvas, RgbBitmap};
pub use error::{Error, Result};
pub use grouping::{group_visits, other_photos, ReportSummary, StoreGroup};
pub use layout::{GridLayout, LayoutCursor};
pub use organizer::organize;
pub use types::{parse_visits, DateRange, PhotoCategory, PhotoRecord, StoreRef, VisitRecord};
pub use url_check::is_renderable_url;
