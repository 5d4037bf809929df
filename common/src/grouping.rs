//! Report front half: date filtering, chronological sort, per-store
//! grouping and per-visit photo selection.
//!
//! The renderer consumes the `StoreGroup` sequence as-is, so every
//! ordering rule of the report lives here and stays testable without
//! touching a PDF.

use crate::types::{DateRange, PhotoCategory, PhotoRecord, VisitRecord};
use crate::url_check::is_renderable_url;

/// Visits of one store, ascending by check-in time.
#[derive(Debug, Clone)]
pub struct StoreGroup {
    pub store_name: String,
    pub visits: Vec<VisitRecord>,
}

/// Headline numbers for the report cover block.
///
/// `total_visits` counts every visit that survived the date filter,
/// including visits whose photo section is omitted for having no
/// "other" photos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_visits: usize,
    pub total_stores: usize,
    pub total_photos: usize,
}

/// Filter by date range, sort ascending by check-in time, and partition
/// by store name. Groups appear in order of each store's earliest
/// visit; the ascending order is preserved inside each group.
pub fn group_visits(
    mut visits: Vec<VisitRecord>,
    range: Option<&DateRange>,
) -> (Vec<StoreGroup>, ReportSummary) {
    if let Some(range) = range {
        visits.retain(|v| range.contains(&v.check_in_time));
    }
    visits.sort_by_key(|v| v.check_in_time);

    let total_visits = visits.len();
    let mut groups: Vec<StoreGroup> = Vec::new();
    for visit in visits {
        match groups.iter().position(|g| g.store_name == visit.store.name) {
            Some(idx) => groups[idx].visits.push(visit),
            None => groups.push(StoreGroup {
                store_name: visit.store.name.clone(),
                visits: vec![visit],
            }),
        }
    }

    let total_photos = groups
        .iter()
        .flat_map(|g| g.visits.iter())
        .map(|v| other_photos(v).len())
        .sum();

    let summary = ReportSummary {
        total_visits,
        total_stores: groups.len(),
        total_photos,
    };
    (groups, summary)
}

/// The visit's in-store work evidence: photos explicitly tagged
/// "other", or untagged and distinct from the visit's own bookend
/// URLs. Sorted ascending by capture time.
pub fn other_photos(visit: &VisitRecord) -> Vec<PhotoRecord> {
    let is_bookend_url = |url: &str| {
        visit.check_in_url.as_deref() == Some(url) || visit.check_out_url.as_deref() == Some(url)
    };

    let mut photos: Vec<PhotoRecord> = visit
        .photos
        .iter()
        .filter(|p| is_renderable_url(&p.url))
        .filter(|p| match p.category {
            Some(PhotoCategory::Other) => true,
            None => !is_bookend_url(&p.url),
            Some(_) => false,
        })
        .cloned()
        .collect();
    photos.sort_by_key(PhotoRecord::capture_key);
    photos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoreRef;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn utc(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, d, h, 0, 0).unwrap()
    }

    fn visit(id: &str, store: &str, check_in: DateTime<Utc>) -> VisitRecord {
        VisitRecord {
            id: id.to_string(),
            store: StoreRef {
                name: store.to_string(),
                address: None,
            },
            check_in_time: check_in,
            check_out_time: None,
            photos: vec![],
            check_in_url: None,
            check_out_url: None,
        }
    }

    fn other_photo(url: &str, at: DateTime<Utc>) -> PhotoRecord {
        PhotoRecord {
            id: None,
            url: format!("https://fotos.minhaloja.com.br/{}", url),
            category: Some(PhotoCategory::Other),
            captured_at: Some(at),
        }
    }

    #[test]
    fn test_groups_keep_first_appearance_order_after_sort() {
        let visits = vec![
            visit("v3", "Loja Norte", utc(12, 9)),
            visit("v1", "Loja Centro", utc(10, 9)),
            visit("v2", "Loja Centro", utc(11, 9)),
        ];
        let (groups, summary) = group_visits(visits, None);

        assert_eq!(summary.total_visits, 3);
        assert_eq!(summary.total_stores, 2);
        assert_eq!(groups[0].store_name, "Loja Centro");
        assert_eq!(groups[1].store_name, "Loja Norte");
        let ids: Vec<&str> = groups[0].visits.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }

    #[test]
    fn test_date_filter_is_end_day_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
        )
        .unwrap();
        let visits = vec![
            visit("kept-a", "Loja Centro", utc(10, 0)),
            visit("kept-b", "Loja Centro", utc(11, 23)),
            visit("dropped", "Loja Centro", utc(12, 0)),
        ];
        let (groups, summary) = group_visits(visits, Some(&range));

        assert_eq!(summary.total_visits, 2);
        let ids: Vec<&str> = groups[0].visits.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["kept-a", "kept-b"]);
    }

    #[test]
    fn test_summary_counts_visits_without_other_photos() {
        let mut with_photos = visit("v1", "Loja Centro", utc(10, 9));
        with_photos.photos = vec![other_photo("a.jpg", utc(10, 10))];
        let bare = visit("v2", "Loja Norte", utc(11, 9));

        let (_, summary) = group_visits(vec![with_photos, bare], None);
        assert_eq!(summary.total_visits, 2);
        assert_eq!(summary.total_photos, 1);
    }

    #[test]
    fn test_other_photos_excludes_bookends_and_sorts() {
        let check_in_url = "https://fotos.minhaloja.com.br/in.jpg".to_string();
        let mut v = visit("v1", "Loja Centro", utc(10, 9));
        v.check_in_url = Some(check_in_url.clone());
        v.photos = vec![
            other_photo("late.jpg", utc(10, 12)),
            PhotoRecord {
                id: None,
                url: check_in_url,
                category: None,
                captured_at: Some(utc(10, 9)),
            },
            other_photo("early.jpg", utc(10, 10)),
            PhotoRecord {
                id: None,
                url: "https://fotos.minhaloja.com.br/out.jpg".to_string(),
                category: Some(PhotoCategory::CheckOut),
                captured_at: Some(utc(10, 13)),
            },
        ];

        let photos = other_photos(&v);
        let urls: Vec<&str> = photos.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://fotos.minhaloja.com.br/early.jpg",
                "https://fotos.minhaloja.com.br/late.jpg",
            ]
        );
    }

    #[test]
    fn test_other_photos_drops_placeholder_urls() {
        let mut v = visit("v1", "Loja Centro", utc(10, 9));
        v.photos = vec![PhotoRecord {
            id: None,
            url: "https://via.placeholder.com/300".to_string(),
            category: Some(PhotoCategory::Other),
            captured_at: None,
        }];
        assert!(other_photos(&v).is_empty());
    }
}
