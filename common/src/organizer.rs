//! Photo organizer.
//!
//! Orders a visit's photo collection for display: check-in photo first,
//! the in-visit "other" photos sorted by capture time, check-out photo
//! last. Pure and synchronous; callers run it as often as they like.

use crate::types::{PhotoCategory, PhotoRecord};
use crate::url_check::is_renderable_url;
use std::collections::HashMap;

/// Organize `photos` into `[check-in?, others by capture time, check-out?]`.
///
/// - Records with empty/placeholder URLs are dropped up front.
/// - Duplicate URLs collapse to a single record, last writer wins.
/// - A bookend is the record tagged check-in/check-out, or failing
///   that the record matching the distinguished URL; if neither exists
///   but the URL itself is renderable, a minimal record is synthesized.
/// - Untagged records not matching a bookend URL count as "other";
///   missing capture times sort earliest.
///
/// Either bookend may be absent, so the result carries 0 to 2 of them.
pub fn organize(
    photos: &[PhotoRecord],
    check_in_url: Option<&str>,
    check_out_url: Option<&str>,
) -> Vec<PhotoRecord> {
    let check_in_url = check_in_url.filter(|u| is_renderable_url(u));
    let check_out_url = check_out_url.filter(|u| is_renderable_url(u));

    let mut records = dedupe_by_url(photos);

    let check_in = take_bookend(&mut records, PhotoCategory::CheckIn, check_in_url);
    let check_out = take_bookend(&mut records, PhotoCategory::CheckOut, check_out_url);

    let mut others: Vec<PhotoRecord> = records
        .into_iter()
        .filter(|r| {
            matches!(r.category, None | Some(PhotoCategory::Other))
                && Some(r.url.as_str()) != check_in_url
                && Some(r.url.as_str()) != check_out_url
        })
        .collect();
    others.sort_by_key(PhotoRecord::capture_key);

    let mut organized = Vec::with_capacity(others.len() + 2);
    organized.extend(check_in);
    organized.append(&mut others);
    organized.extend(check_out);
    organized
}

/// Drop unrenderable URLs and collapse duplicates. The surviving record
/// keeps the first occurrence's position but the last occurrence's data.
fn dedupe_by_url(photos: &[PhotoRecord]) -> Vec<PhotoRecord> {
    let mut by_url: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<PhotoRecord> = Vec::new();

    for photo in photos {
        if !is_renderable_url(&photo.url) {
            continue;
        }
        match by_url.get(&photo.url) {
            Some(&idx) => records[idx] = photo.clone(),
            None => {
                by_url.insert(photo.url.clone(), records.len());
                records.push(photo.clone());
            }
        }
    }
    records
}

/// Pull the bookend for `category` out of `records`, synthesizing one
/// from the bare URL when no record claims the slot.
fn take_bookend(
    records: &mut Vec<PhotoRecord>,
    category: PhotoCategory,
    url: Option<&str>,
) -> Option<PhotoRecord> {
    let tagged = records.iter().position(|r| r.category == Some(category));
    let by_url = || {
        url.and_then(|u| {
            records
                .iter()
                .position(|r| r.category.is_none() && r.url == u)
        })
    };

    if let Some(idx) = tagged.or_else(by_url) {
        let mut record = records.remove(idx);
        record.category = Some(category);
        return Some(record);
    }

    url.map(|u| PhotoRecord {
        id: None,
        url: u.to_string(),
        category: Some(category),
        captured_at: None,
    })
}
