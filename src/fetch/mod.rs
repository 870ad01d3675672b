// src/fetch/mod.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{error, info};

use crate::client::types::{FeedbackDetail, FeedbackType, GetFeedbackRequest};
use crate::client::FeedbackSource;

/// One feedback entry, flattened out of the wire envelope. Immutable once
/// constructed; nothing back-fills fields later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRow {
    pub comment_text: Option<String>,
    pub comment_type: Option<String>,
    pub comment_time: Option<DateTime<Utc>>,
    pub role: Option<String>,
    pub item_id: String,
    pub item_title: Option<String>,
    pub commenting_user: Option<String>,
}

impl FeedbackRow {
    fn from_detail(fb: &FeedbackDetail) -> Self {
        Self {
            comment_text: fb.comment_text.clone(),
            comment_type: fb.comment_type.clone(),
            comment_time: fb.comment_time.as_deref().and_then(parse_comment_time),
            role: fb.role.clone(),
            item_id: fb.item_id.clone().unwrap_or_default(),
            item_title: fb.item_title.clone(),
            commenting_user: fb.commenting_user.clone(),
        }
    }
}

/// Why the fetch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchEnd {
    /// Every declared page was consumed, or a page came back empty.
    Completed,
    /// The request for `page` failed; rows from earlier pages were kept.
    Truncated { page: u32 },
}

#[derive(Debug)]
pub struct FetchedFeedback {
    pub rows: Vec<FeedbackRow>,
    pub end: FetchEnd,
}

/// Walk every page of the feedback listing and accumulate flattened rows.
///
/// A failed page does not fail the export: the error is logged once (with
/// the raw response body when one exists) and whatever was accumulated is
/// returned. There is deliberately no retry here.
pub async fn fetch_all_feedback<S: FeedbackSource>(
    source: &S,
    feedback_type: FeedbackType,
    entries_per_page: u32,
) -> FetchedFeedback {
    let mut page: u32 = 1;
    let mut rows: Vec<FeedbackRow> = Vec::new();

    loop {
        let req = GetFeedbackRequest::page(feedback_type, entries_per_page, page);
        let resp = match source.feedback_page(&req).await {
            Ok(resp) => resp,
            Err(e) => {
                match e.response_body() {
                    Some(body) => {
                        error!(page, error = %e, body, "GetFeedback failed; keeping rows fetched so far")
                    }
                    None => {
                        error!(page, error = %e, "GetFeedback failed; keeping rows fetched so far")
                    }
                }
                return FetchedFeedback {
                    rows,
                    end: FetchEnd::Truncated { page },
                };
            }
        };

        let details = resp.details();
        if details.is_empty() {
            return FetchedFeedback {
                rows,
                end: FetchEnd::Completed,
            };
        }
        rows.extend(details.iter().map(FeedbackRow::from_detail));

        // A response without pagination metadata terminates the loop.
        let total_pages = resp.total_pages().unwrap_or(page);
        info!(page, total_pages, rows = rows.len(), "fetched feedback page");

        if page >= total_pages {
            return FetchedFeedback {
                rows,
                end: FetchEnd::Completed,
            };
        }
        page += 1;
    }
}

/// Defensive parse of the listing's free-form timestamps. The API emits
/// RFC 3339 (`2024-03-05T10:00:00.000Z`), but anything unrecognized must
/// degrade to `None` rather than abort the fetch. Naive values are taken
/// as UTC, which is what the Trading API reports in.
pub fn parse_comment_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
