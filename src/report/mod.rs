//! Report assembly: load visits, group them, render, persist.

pub mod fetch;
pub mod pdf;
pub mod renderer;

pub use fetch::{HttpPhotoFetcher, PhotoFetcher, StoragePhotoFetcher};
pub use pdf::PdfCanvas;
pub use renderer::ReportMeta;

use crate::error::{Result, VisitReportError};
use std::path::{Path, PathBuf};
use visit_report_common::grouping::group_visits;
use visit_report_common::{parse_visits, DateRange, ReportSummary, VisitRecord};

/// Read and parse the visits JSON exported by the upstream app.
pub fn load_visits(input: &Path) -> Result<Vec<VisitRecord>> {
    if !input.exists() {
        return Err(VisitReportError::FileNotFound(input.display().to_string()));
    }
    let content = std::fs::read_to_string(input)?;
    Ok(parse_visits(&content)?)
}

/// `relatorio-<subject>-<range|all>.pdf`, whitespace in the subject
/// replaced by hyphens.
pub fn report_file_name(subject: &str, range: Option<&DateRange>) -> String {
    let slug = subject.split_whitespace().collect::<Vec<_>>().join("-");
    let slug = if slug.is_empty() { "visitas".to_string() } else { slug };
    let period = match range {
        Some(r) => format!(
            "{}_{}",
            r.start.format("%d-%m-%Y"),
            r.end.format("%d-%m-%Y")
        ),
        None => "all".to_string(),
    };
    format!("relatorio-{}-{}.pdf", slug, period)
}

pub fn period_label(range: Option<&DateRange>) -> String {
    match range {
        Some(r) => format!(
            "{} a {}",
            r.start.format("%d/%m/%Y"),
            r.end.format("%d/%m/%Y")
        ),
        None => "todas as datas".to_string(),
    }
}

/// Generate the PDF under `output_dir` and return its path alongside
/// the headline numbers.
pub async fn write_report<F: PhotoFetcher>(
    visits: Vec<VisitRecord>,
    range: Option<&DateRange>,
    subject: &str,
    output_dir: &Path,
    fetcher: &F,
) -> Result<(PathBuf, ReportSummary)> {
    let (groups, summary) = group_visits(visits, range);

    let mut canvas = PdfCanvas::new("Relatorio de Visitas")?;
    let meta = ReportMeta {
        subject: subject.to_string(),
        period_label: period_label(range),
    };
    renderer::render_report(&mut canvas, fetcher, &groups, &summary, &meta).await?;

    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(report_file_name(subject, range));
    canvas.save(&output_path)?;

    Ok((output_path, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_report_file_name_hyphenates_subject() {
        assert_eq!(
            report_file_name("Maria da Silva", None),
            "relatorio-Maria-da-Silva-all.pdf"
        );
    }

    #[test]
    fn test_report_file_name_with_range() {
        assert_eq!(
            report_file_name("Maria", Some(&range())),
            "relatorio-Maria-01-08-2026_15-08-2026.pdf"
        );
    }

    #[test]
    fn test_report_file_name_empty_subject_falls_back() {
        assert_eq!(report_file_name("   ", None), "relatorio-visitas-all.pdf");
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(Some(&range())), "01/08/2026 a 15/08/2026");
        assert_eq!(period_label(None), "todas as datas");
    }
}
