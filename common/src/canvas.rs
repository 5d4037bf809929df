//! Drawing abstraction consumed by the report renderer.
//!
//! Coordinates are millimeters with the origin at the top-left of the
//! page (the same convention as `layout::LayoutCursor`); backends
//! convert to their native space. The renderer never talks to a PDF
//! library directly, which keeps layout behavior observable through
//! `RecordingCanvas`.

/// Decoded image handed to a canvas: raw 8-bit RGB rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbBitmap {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Minimal 2-D page surface: new page, image, text, filled rectangle,
/// page dimensions.
pub trait Canvas {
    /// `(width, height)` of a page in mm.
    fn page_size_mm(&self) -> (f32, f32);

    /// Open a fresh page; subsequent draws land on it.
    fn new_page(&mut self);

    /// Place text with its baseline at `y_mm` from the page top.
    fn draw_text(&mut self, text: &str, size_pt: f32, x_mm: f32, y_mm: f32, style: FontStyle);

    /// Place a bitmap with its top-left corner at `(x_mm, y_mm)`.
    /// Callers pass a box matching the bitmap's aspect ratio.
    fn draw_image(&mut self, bitmap: &RgbBitmap, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32);

    /// Fill a rectangle with a gray level (`0.0` black to `1.0` white).
    fn fill_rect(&mut self, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32, gray: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    NewPage,
    Text {
        text: String,
        size_pt: f32,
        x_mm: f32,
        y_mm: f32,
        style: FontStyle,
    },
    Image {
        width_px: u32,
        height_px: u32,
        x_mm: f32,
        y_mm: f32,
        w_mm: f32,
        h_mm: f32,
    },
    Rect {
        x_mm: f32,
        y_mm: f32,
        w_mm: f32,
        h_mm: f32,
        gray: f32,
    },
}

/// Test double that records every drawing call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages drawn so far (the implicit first page included).
    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::NewPage))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text_containing(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Canvas for RecordingCanvas {
    fn page_size_mm(&self) -> (f32, f32) {
        (crate::layout::A4_WIDTH_MM, crate::layout::A4_HEIGHT_MM)
    }

    fn new_page(&mut self) {
        self.ops.push(CanvasOp::NewPage);
    }

    fn draw_text(&mut self, text: &str, size_pt: f32, x_mm: f32, y_mm: f32, style: FontStyle) {
        self.ops.push(CanvasOp::Text {
            text: text.to_string(),
            size_pt,
            x_mm,
            y_mm,
            style,
        });
    }

    fn draw_image(&mut self, bitmap: &RgbBitmap, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32) {
        self.ops.push(CanvasOp::Image {
            width_px: bitmap.width,
            height_px: bitmap.height,
            x_mm,
            y_mm,
            w_mm,
            h_mm,
        });
    }

    fn fill_rect(&mut self, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32, gray: f32) {
        self.ops.push(CanvasOp::Rect {
            x_mm,
            y_mm,
            w_mm,
            h_mm,
            gray,
        });
    }
}
