// src/transform/mod.rs

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

use crate::fetch::FeedbackRow;

/// Star rating for each eBay comment type. Comment types outside this
/// table drop the row; they are never defaulted to a rating.
pub static RATING_MAP: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| HashMap::from([("Positive", 5), ("Neutral", 3), ("Negative", 1)]));

/// Column order of the review-import template, also the header row of the
/// exported spreadsheet.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "title",
    "body",
    "rating",
    "review_date",
    "reviewer_name",
    "reviewer_email",
    "product_url",
    "picture_urls",
    "product_id",
    "product_handle",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("no feedback rows supplied to build_reviews_export")]
    EmptyInput,
    #[error("no seller feedback with comments after filtering")]
    NoMatchingRows,
}

/// One line of the review-import table. No field is ever absent; the empty
/// string stands in for anything unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub title: String,
    pub body: String,
    pub rating: u8,
    pub review_date: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub product_url: String,
    pub picture_urls: String,
    pub product_id: String,
    pub product_handle: String,
}

/// Filter and reshape raw feedback rows into review-import rows.
///
/// Keeps seller feedback that has both a comment and a comment type, maps
/// the comment type through [`RATING_MAP`], and preserves input order.
pub fn build_reviews_export(
    rows: &[FeedbackRow],
    base_url: &str,
) -> Result<Vec<ReviewRow>, TransformError> {
    if rows.is_empty() {
        return Err(TransformError::EmptyInput);
    }

    let base = base_url.trim_end_matches('/');

    let seller_rows: Vec<&FeedbackRow> = rows
        .iter()
        .filter(|r| {
            r.role.as_deref() == Some("Seller")
                && r.comment_text.is_some()
                && r.comment_type.is_some()
        })
        .collect();
    if seller_rows.is_empty() {
        return Err(TransformError::NoMatchingRows);
    }

    let out: Vec<ReviewRow> = seller_rows
        .into_iter()
        .filter_map(|r| {
            let rating = *RATING_MAP.get(r.comment_type.as_deref()?)?;
            Some(ReviewRow {
                title: r.item_title.clone().unwrap_or_default(),
                body: r.comment_text.clone().unwrap_or_default(),
                rating,
                review_date: r
                    .comment_time
                    .map(|t| t.format("%d/%m/%Y").to_string())
                    .unwrap_or_default(),
                reviewer_name: r.commenting_user.clone().unwrap_or_default(),
                reviewer_email: String::new(),
                product_url: if r.item_id.is_empty() {
                    String::new()
                } else {
                    format!("{}/itm/{}", base, r.item_id)
                },
                picture_urls: String::new(),
                product_id: String::new(),
                product_handle: String::new(),
            })
        })
        .collect();

    if out.is_empty() {
        return Err(TransformError::NoMatchingRows);
    }
    Ok(out)
}
