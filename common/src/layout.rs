//! Page layout: grid geometry and the page-break cursor.
//!
//! All values are millimeters on an A4 portrait page. The cursor is an
//! explicit value threaded through the renderer instead of a shared
//! mutable position, so page-break behavior is unit-testable on its
//! own.

// ============================================
// Page geometry (mm)
// ============================================

/// A4 portrait
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

pub const MARGIN_MM: f32 = 10.0;
pub const USABLE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 190mm

// ============================================
// Photo grid (mm)
// ============================================

/// Fixed column count of the photo grid.
pub const GRID_COLUMNS: usize = 2;
pub const CELL_GAP_MM: f32 = 5.0;

/// Cell width from the usable width; cell height follows a 4:3 frame.
pub const CELL_WIDTH_MM: f32 =
    (USABLE_WIDTH_MM - CELL_GAP_MM * (GRID_COLUMNS as f32 - 1.0)) / GRID_COLUMNS as f32; // 92.5mm
pub const CELL_HEIGHT_MM: f32 = CELL_WIDTH_MM * 3.0 / 4.0; // 69.375mm
pub const ROW_HEIGHT_MM: f32 = CELL_HEIGHT_MM + CELL_GAP_MM;

// ============================================
// Section header probes (mm)
// ============================================

/// Height required before a header is written, so a title never sits
/// orphaned at the bottom of a page.
pub const REPORT_HEADER_MM: f32 = 30.0;
pub const STORE_HEADER_MM: f32 = 14.0;
pub const VISIT_HEADER_MM: f32 = 10.0;

// ============================================
// Font sizes (pt)
// ============================================

pub const TITLE_FONT_SIZE: f32 = 18.0;
pub const HEADER_FONT_SIZE: f32 = 12.0;
pub const NORMAL_FONT_SIZE: f32 = 10.0;
pub const SMALL_FONT_SIZE: f32 = 8.0;

/// Grid geometry of one report page.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub columns: usize,
    pub cell_width_mm: f32,
    pub cell_height_mm: f32,
    pub gap_mm: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            cell_width_mm: CELL_WIDTH_MM,
            cell_height_mm: CELL_HEIGHT_MM,
            gap_mm: CELL_GAP_MM,
        }
    }
}

impl GridLayout {
    /// X of the cell in `col` (0-based), from the left page edge.
    pub fn cell_x_mm(&self, col: usize) -> f32 {
        MARGIN_MM + col as f32 * (self.cell_width_mm + self.gap_mm)
    }

    /// Height consumed by one photo row including its trailing gap.
    pub fn row_height_mm(&self) -> f32 {
        self.cell_height_mm + self.gap_mm
    }
}

/// Vertical layout position, measured from the top of the page.
///
/// `ensure` is the single page-break decision point: when the probed
/// height would cross the bottom margin it breaks first, and the caller
/// continues writing from the top margin of the fresh page.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    y_mm: f32,
    page_height_mm: f32,
    margin_mm: f32,
    pages: usize,
}

impl LayoutCursor {
    pub fn new(page_height_mm: f32, margin_mm: f32) -> Self {
        Self {
            y_mm: margin_mm,
            page_height_mm,
            margin_mm,
            pages: 1,
        }
    }

    /// Current distance from the top of the page.
    pub fn y_mm(&self) -> f32 {
        self.y_mm
    }

    /// Pages opened so far (starts at 1).
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Would `height_mm` more fit above the bottom margin?
    pub fn fits(&self, height_mm: f32) -> bool {
        self.y_mm + height_mm <= self.page_height_mm - self.margin_mm
    }

    /// Start a new page and reset to the top margin.
    pub fn page_break(&mut self) {
        self.pages += 1;
        self.y_mm = self.margin_mm;
    }

    /// Break the page unless `height_mm` still fits. Returns true when
    /// a break happened, so the caller can open the page on its canvas.
    pub fn ensure(&mut self, height_mm: f32) -> bool {
        if self.fits(height_mm) {
            return false;
        }
        self.page_break();
        true
    }

    /// Consume `height_mm` of vertical space.
    pub fn advance(&mut self, height_mm: f32) {
        self.y_mm += height_mm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert!((USABLE_WIDTH_MM - 190.0).abs() < 0.01);
        assert!((CELL_WIDTH_MM - 92.5).abs() < 0.01);
        // 4:3 frame
        assert!((CELL_WIDTH_MM / CELL_HEIGHT_MM - 4.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_cell_positions() {
        let grid = GridLayout::default();
        assert!((grid.cell_x_mm(0) - MARGIN_MM).abs() < 0.01);
        let second = grid.cell_x_mm(1);
        assert!((second - (MARGIN_MM + CELL_WIDTH_MM + CELL_GAP_MM)).abs() < 0.01);
        // second column ends exactly at the right margin
        assert!((second + CELL_WIDTH_MM - (A4_WIDTH_MM - MARGIN_MM)).abs() < 0.01);
    }

    #[test]
    fn test_cursor_starts_at_top_margin() {
        let cursor = LayoutCursor::new(A4_HEIGHT_MM, MARGIN_MM);
        assert_eq!(cursor.pages(), 1);
        assert!((cursor.y_mm() - MARGIN_MM).abs() < 0.01);
    }

    #[test]
    fn test_ensure_breaks_exactly_once_for_overflowing_row() {
        let grid = GridLayout::default();
        let mut cursor = LayoutCursor::new(A4_HEIGHT_MM, MARGIN_MM);

        // fill the page until one more row no longer fits
        while cursor.fits(grid.row_height_mm()) {
            cursor.advance(grid.row_height_mm());
        }
        let broke = cursor.ensure(grid.row_height_mm());

        assert!(broke);
        assert_eq!(cursor.pages(), 2);
        // the row renders at the top margin of the new page
        assert!((cursor.y_mm() - MARGIN_MM).abs() < 0.01);
        // and a second probe right after must not break again
        assert!(!cursor.ensure(grid.row_height_mm()));
        assert_eq!(cursor.pages(), 2);
    }

    #[test]
    fn test_ensure_no_break_when_space_remains() {
        let mut cursor = LayoutCursor::new(A4_HEIGHT_MM, MARGIN_MM);
        assert!(!cursor.ensure(STORE_HEADER_MM));
        assert_eq!(cursor.pages(), 1);
    }

    #[test]
    fn test_header_probe_breaks_before_orphaning() {
        let mut cursor = LayoutCursor::new(A4_HEIGHT_MM, MARGIN_MM);
        // park the cursor just above the bottom margin
        cursor.advance(A4_HEIGHT_MM - MARGIN_MM * 2.0 - 5.0);
        assert!(cursor.ensure(STORE_HEADER_MM));
        assert_eq!(cursor.pages(), 2);
    }
}
