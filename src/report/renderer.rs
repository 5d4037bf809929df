//! Report renderer.
//!
//! Walks the grouped visits and drives a `Canvas`, fetching photos one
//! await at a time so cells land in visit/time order. A failed fetch
//! degrades that cell to a placeholder and never aborts the document.

use crate::error::Result;
use crate::report::fetch::PhotoFetcher;
use indicatif::ProgressBar;
use visit_report_common::grouping::other_photos;
use visit_report_common::layout::{
    self, GridLayout, LayoutCursor, HEADER_FONT_SIZE, NORMAL_FONT_SIZE, SMALL_FONT_SIZE,
    TITLE_FONT_SIZE,
};
use visit_report_common::{Canvas, FontStyle, ReportSummary, StoreGroup, VisitRecord};

/// Cover-block contents.
pub struct ReportMeta {
    pub subject: String,
    pub period_label: String,
}

const PLACEHOLDER_GRAY: f32 = 0.85;
const PLACEHOLDER_LABEL: &str = "Imagem indisponivel";

pub async fn render_report<C: Canvas, F: PhotoFetcher>(
    canvas: &mut C,
    fetcher: &F,
    groups: &[StoreGroup],
    summary: &ReportSummary,
    meta: &ReportMeta,
) -> Result<()> {
    let grid = GridLayout::default();
    let (_, page_height) = canvas.page_size_mm();
    let mut cursor = LayoutCursor::new(page_height, layout::MARGIN_MM);
    let progress = ProgressBar::new(summary.total_photos as u64);

    draw_cover_block(canvas, &mut cursor, summary, meta);

    for group in groups {
        // visits without "other" photos stay out of the photo section
        let visits: Vec<(&VisitRecord, Vec<_>)> = group
            .visits
            .iter()
            .map(|v| (v, other_photos(v)))
            .filter(|(_, photos)| !photos.is_empty())
            .collect();
        if visits.is_empty() {
            continue;
        }

        if cursor.ensure(layout::STORE_HEADER_MM) {
            canvas.new_page();
        }
        draw_store_header(canvas, &mut cursor, group);

        for (visit, photos) in visits {
            if cursor.ensure(layout::VISIT_HEADER_MM) {
                canvas.new_page();
            }
            draw_visit_header(canvas, &mut cursor, visit);

            for row in photos.chunks(grid.columns) {
                if cursor.ensure(grid.cell_height_mm) {
                    canvas.new_page();
                }
                for (col, photo) in row.iter().enumerate() {
                    let x = grid.cell_x_mm(col);
                    let y = cursor.y_mm();
                    match fetcher.fetch(&photo.url).await {
                        Ok(bitmap) => {
                            let (dx, dy, w, h) = fit_in_cell(bitmap.aspect_ratio(), &grid);
                            canvas.draw_image(&bitmap, x + dx, y + dy, w, h);
                        }
                        Err(_) => draw_placeholder(canvas, &grid, x, y),
                    }
                    progress.inc(1);
                }
                cursor.advance(grid.row_height_mm());
            }
        }
    }
    progress.finish_and_clear();

    Ok(())
}

fn draw_cover_block<C: Canvas>(
    canvas: &mut C,
    cursor: &mut LayoutCursor,
    summary: &ReportSummary,
    meta: &ReportMeta,
) {
    let x = layout::MARGIN_MM;
    let y = cursor.y_mm();

    canvas.draw_text(
        "Relatorio de Visitas",
        TITLE_FONT_SIZE,
        x,
        y + 6.0,
        FontStyle::Bold,
    );
    canvas.draw_text(&meta.subject, HEADER_FONT_SIZE, x, y + 13.0, FontStyle::Bold);
    canvas.draw_text(
        &format!("Periodo: {}", meta.period_label),
        NORMAL_FONT_SIZE,
        x,
        y + 19.0,
        FontStyle::Regular,
    );
    canvas.draw_text(
        &format!(
            "Total de Visitas: {}   Lojas: {}",
            summary.total_visits, summary.total_stores
        ),
        NORMAL_FONT_SIZE,
        x,
        y + 25.0,
        FontStyle::Regular,
    );

    cursor.advance(layout::REPORT_HEADER_MM);
}

fn draw_store_header<C: Canvas>(canvas: &mut C, cursor: &mut LayoutCursor, group: &StoreGroup) {
    let x = layout::MARGIN_MM;
    let y = cursor.y_mm();

    canvas.draw_text(&group.store_name, HEADER_FONT_SIZE, x, y + 6.0, FontStyle::Bold);
    if let Some(address) = group.visits.first().and_then(|v| v.store.address.as_deref()) {
        canvas.draw_text(address, SMALL_FONT_SIZE, x, y + 11.0, FontStyle::Regular);
    }

    cursor.advance(layout::STORE_HEADER_MM);
}

fn draw_visit_header<C: Canvas>(canvas: &mut C, cursor: &mut LayoutCursor, visit: &VisitRecord) {
    let x = layout::MARGIN_MM;
    let y = cursor.y_mm();

    canvas.draw_text(
        &visit_line(visit),
        NORMAL_FONT_SIZE,
        x,
        y + 5.0,
        FontStyle::Regular,
    );

    cursor.advance(layout::VISIT_HEADER_MM);
}

fn draw_placeholder<C: Canvas>(canvas: &mut C, grid: &GridLayout, x: f32, y: f32) {
    canvas.fill_rect(x, y, grid.cell_width_mm, grid.cell_height_mm, PLACEHOLDER_GRAY);
    canvas.draw_text(
        PLACEHOLDER_LABEL,
        SMALL_FONT_SIZE,
        x + grid.cell_width_mm / 2.0 - 14.0,
        y + grid.cell_height_mm / 2.0,
        FontStyle::Regular,
    );
}

/// Largest aspect-preserving box inside one grid cell, centered.
/// Returns `(dx, dy, w, h)` relative to the cell's top-left corner.
fn fit_in_cell(aspect: f32, grid: &GridLayout) -> (f32, f32, f32, f32) {
    let cell_aspect = grid.cell_width_mm / grid.cell_height_mm;
    let (w, h) = if aspect >= cell_aspect {
        (grid.cell_width_mm, grid.cell_width_mm / aspect)
    } else {
        (grid.cell_height_mm * aspect, grid.cell_height_mm)
    };
    (
        (grid.cell_width_mm - w) / 2.0,
        (grid.cell_height_mm - h) / 2.0,
        w,
        h,
    )
}

/// "Visita em 10/08/2026 09:00 - Duracao: 2.50h"; the duration only
/// appears once the visit has a check-out.
pub fn visit_line(visit: &VisitRecord) -> String {
    let date = visit.check_in_time.format("%d/%m/%Y %H:%M");
    match visit.duration_hours() {
        Some(hours) => format!("Visita em {} - Duracao: {:.2}h", date, hours),
        None => format!("Visita em {}", date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use visit_report_common::StoreRef;

    #[test]
    fn test_visit_line_with_duration() {
        let visit = VisitRecord {
            id: "v1".to_string(),
            store: StoreRef::default(),
            check_in_time: chrono::Utc.with_ymd_and_hms(2026, 8, 10, 9, 0, 0).unwrap(),
            check_out_time: Some(chrono::Utc.with_ymd_and_hms(2026, 8, 10, 11, 30, 0).unwrap()),
            photos: vec![],
            check_in_url: None,
            check_out_url: None,
        };
        assert_eq!(visit_line(&visit), "Visita em 10/08/2026 09:00 - Duracao: 2.50h");
    }

    #[test]
    fn test_visit_line_without_check_out() {
        let visit = VisitRecord {
            id: "v1".to_string(),
            store: StoreRef::default(),
            check_in_time: chrono::Utc.with_ymd_and_hms(2026, 8, 10, 14, 5, 0).unwrap(),
            check_out_time: None,
            photos: vec![],
            check_in_url: None,
            check_out_url: None,
        };
        assert_eq!(visit_line(&visit), "Visita em 10/08/2026 14:05");
    }

    #[test]
    fn test_fit_in_cell_wide_image_is_width_bound() {
        let grid = GridLayout::default();
        let (dx, dy, w, h) = fit_in_cell(2.0, &grid);
        assert!((w - grid.cell_width_mm).abs() < 0.01);
        assert!(h < grid.cell_height_mm);
        assert!((dx - 0.0).abs() < 0.01);
        assert!(dy > 0.0);
    }

    #[test]
    fn test_fit_in_cell_tall_image_is_height_bound() {
        let grid = GridLayout::default();
        let (dx, dy, w, h) = fit_in_cell(0.5, &grid);
        assert!((h - grid.cell_height_mm).abs() < 0.01);
        assert!(w < grid.cell_width_mm);
        assert!(dx > 0.0);
        assert!((dy - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_fit_in_cell_matching_aspect_fills_cell() {
        let grid = GridLayout::default();
        let (_, _, w, h) = fit_in_cell(4.0 / 3.0, &grid);
        assert!((w - grid.cell_width_mm).abs() < 0.01);
        assert!((h - grid.cell_height_mm).abs() < 0.01);
    }
}
