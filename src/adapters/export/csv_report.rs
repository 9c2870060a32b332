//! CSV report builder. Uses the `csv` crate for field escaping.
//!
//! Layout: `Title,Category,Verified,Time,URL`, comma-delimited, one row per news item.
//! The title is always double-quoted; other fields are quoted only when needed.

use crate::domain::NewsItem;

pub const CSV_HEADER: &str = "Title,Category,Verified,Time,URL";

/// Convert the displayed news list to report CSV.
///
/// Output depends only on `items`, so exporting an unchanged list twice yields
/// byte-identical content.
pub fn news_to_csv(items: &[NewsItem]) -> Result<String, csv::Error> {
    let mut out = String::with_capacity(64 + items.len() * 160);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for item in items {
        out.push_str(&format_news_row(item)?);
    }
    Ok(out)
}

/// Wrap in double quotes, doubling embedded quotes (RFC 4180).
fn quote_always(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_news_row(item: &NewsItem) -> Result<String, csv::Error> {
    // Keep one physical line per row
    let title = item.title.replace(['\n', '\r'], " ");
    let verified = if item.is_verified { "YES" } else { "NO" };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record([
        item.category.prompt_token(),
        verified,
        item.timestamp.as_str(),
        item.url.as_str(),
    ])?;
    wtr.flush()?;

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    let rest = String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;

    let mut row = format!("{},{}", quote_always(&title), rest);
    if !row.ends_with('\n') {
        row.push('\n');
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn item(title: &str, verified: bool) -> NewsItem {
        NewsItem {
            id: "1".to_string(),
            title: title.to_string(),
            summary: "s".to_string(),
            sources: vec![],
            url: "https://news.example/a".to_string(),
            timestamp: "2026-10-18 09:00".to_string(),
            category: Category::Economy,
            is_verified: verified,
            verification_details: String::new(),
            grounding: None,
        }
    }

    #[test]
    fn test_news_to_csv_basic() {
        let csv = news_to_csv(&[item("Rates hold", true), item("Outage", false)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Title,Category,Verified,Time,URL");
        assert_eq!(
            lines[1],
            "\"Rates hold\",Economy,YES,2026-10-18 09:00,https://news.example/a"
        );
        assert_eq!(
            lines[2],
            "\"Outage\",Economy,NO,2026-10-18 09:00,https://news.example/a"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_news_to_csv_escapes_title() {
        let csv = news_to_csv(&[item("He said \"no\",\nthen left", false)]).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"He said \"\"no\"\", then left\",Economy,NO"));
    }

    #[test]
    fn test_news_to_csv_quotes_other_fields_when_needed() {
        let mut it = item("T", true);
        it.timestamp = "Oct 18, 2026".to_string();
        let csv = news_to_csv(&[it]).unwrap();
        assert!(csv.contains(",\"Oct 18, 2026\","));
    }

    #[test]
    fn test_news_to_csv_is_deterministic() {
        let items = vec![item("A", true), item("B", false)];
        assert_eq!(news_to_csv(&items).unwrap(), news_to_csv(&items).unwrap());
    }

    #[test]
    fn test_news_to_csv_empty_list_is_header_only() {
        assert_eq!(news_to_csv(&[]).unwrap(), "Title,Category,Verified,Time,URL\n");
    }
}
