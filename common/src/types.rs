//! Visit and photo record types.
//!
//! Records arrive as camelCase JSON exported by the upstream field app.
//! Everything here is transient: parsed once, consumed by the organizer
//! and the paginator, never persisted.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Photo classification tag. Untagged photos are classified at
/// organization time (see `organizer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoCategory {
    CheckIn,
    CheckOut,
    Other,
}

/// One photo attached to a visit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoRecord {
    pub id: Option<String>,
    pub url: String,
    pub category: Option<PhotoCategory>,
    pub captured_at: Option<DateTime<Utc>>,
}

impl PhotoRecord {
    /// Sort key for chronological ordering. Photos without a capture
    /// time sort first.
    pub fn capture_key(&self) -> DateTime<Utc> {
        self.captured_at.unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Store the visit happened at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreRef {
    pub name: String,
    pub address: Option<String>,
}

/// One store visit with its photo collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: String,
    pub store: StoreRef,
    pub check_in_time: DateTime<Utc>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default)]
    pub check_in_url: Option<String>,
    #[serde(default)]
    pub check_out_url: Option<String>,
}

impl VisitRecord {
    /// Visit duration in hours, rounded to 2 decimals. `None` while the
    /// visit has no check-out.
    pub fn duration_hours(&self) -> Option<f64> {
        let check_out = self.check_out_time?;
        let secs = (check_out - self.check_in_time).num_seconds() as f64;
        Some((secs / 3600.0 * 100.0).round() / 100.0)
    }
}

/// Inclusive date filter. The whole calendar day of `end` counts,
/// whatever time-of-day the check-in carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidRange(format!(
                "end {} before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        day >= self.start && day <= self.end
    }
}

/// Parse a JSON array of visit records.
///
/// A check-out earlier than the check-in violates the record invariant;
/// the check-out is dropped rather than failing the whole batch.
pub fn parse_visits(json: &str) -> Result<Vec<VisitRecord>> {
    let mut visits: Vec<VisitRecord> = serde_json::from_str(json)?;
    for visit in &mut visits {
        if let Some(check_out) = visit.check_out_time {
            if check_out < visit.check_in_time {
                visit.check_out_time = None;
            }
        }
    }
    Ok(visits)
}
