// src/export/mod.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

use crate::transform::{ReviewRow, EXPORT_COLUMNS};

/// `<dir>/ebay_product_reviews_for_judgeme_<YYYYMMDD_HHMMSS>.xlsx`, stamped
/// in UTC so successive runs never clobber each other.
pub fn timestamped_output_path(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!(
        "ebay_product_reviews_for_judgeme_{}.xlsx",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Write the review rows to one worksheet: a bold header row followed by
/// one row per review, columns in [`EXPORT_COLUMNS`] order.
pub fn write_reviews_xlsx(path: &Path, rows: &[ReviewRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write(r, 0, row.title.as_str())?;
        worksheet.write(r, 1, row.body.as_str())?;
        worksheet.write(r, 2, row.rating as u32)?;
        worksheet.write(r, 3, row.review_date.as_str())?;
        worksheet.write(r, 4, row.reviewer_name.as_str())?;
        worksheet.write(r, 5, row.reviewer_email.as_str())?;
        worksheet.write(r, 6, row.product_url.as_str())?;
        worksheet.write(r, 7, row.picture_urls.as_str())?;
        worksheet.write(r, 8, row.product_id.as_str())?;
        worksheet.write(r, 9, row.product_handle.as_str())?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing spreadsheet {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn review(name: &str) -> ReviewRow {
        ReviewRow {
            title: "Widget".to_string(),
            body: "Great!".to_string(),
            rating: 5,
            review_date: "05/03/2024".to_string(),
            reviewer_name: name.to_string(),
            reviewer_email: String::new(),
            product_url: "https://www.ebay.co.uk/itm/123".to_string(),
            picture_urls: String::new(),
            product_id: String::new(),
            product_handle: String::new(),
        }
    }

    #[test]
    fn output_path_is_utc_stamped() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let path = timestamped_output_path(Path::new("output"), now);
        assert_eq!(
            path,
            Path::new("output/ebay_product_reviews_for_judgeme_20240305_100000.xlsx")
        );
    }

    #[test]
    fn writes_a_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.xlsx");

        write_reviews_xlsx(&path, &[review("alice"), review("bob")]).unwrap();

        // xlsx is a ZIP container; check the magic instead of re-parsing.
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn writes_an_empty_table_with_headers_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_reviews_xlsx(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
