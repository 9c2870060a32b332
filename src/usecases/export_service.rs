//! Report export: displayed news list -> CSV file named after the export time.

use crate::adapters::export::news_to_csv;
use crate::domain::{DomainError, NewsItem};
use crate::ports::{ClockPort, ReportPort};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// `MrDaniel_Report_<epoch-millis>.csv`
pub fn report_file_name(at: DateTime<Utc>) -> String {
    format!("MrDaniel_Report_{}.csv", at.timestamp_millis())
}

pub struct ExportService {
    sink: Arc<dyn ReportPort>,
    clock: Arc<dyn ClockPort>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn ReportPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { sink, clock }
    }

    /// Write the list as CSV. An empty list yields a header-only file.
    pub async fn export(&self, items: &[NewsItem]) -> Result<PathBuf, DomainError> {
        let csv = news_to_csv(items)
            .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;
        let file_name = report_file_name(self.clock.now());
        let path = self.sink.save(&file_name, &csv).await?;
        info!(rows = items.len(), path = %path.display(), "news report exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::domain::Category;
    use chrono::TimeZone;
    use std::sync::Mutex;

    /// Captures saved reports in memory.
    #[derive(Default)]
    struct MemorySink {
        saved: Mutex<Vec<(String, String)>>,
    }

    #[async_trait::async_trait]
    impl ReportPort for MemorySink {
        async fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, DomainError> {
            self.saved
                .lock()
                .unwrap()
                .push((file_name.to_string(), contents.to_string()));
            Ok(PathBuf::from(file_name))
        }
    }

    fn item() -> NewsItem {
        NewsItem {
            id: "1".to_string(),
            title: "Grid stable".to_string(),
            summary: String::new(),
            sources: vec![],
            url: "https://n/1".to_string(),
            timestamp: "09:00".to_string(),
            category: Category::Energy,
            is_verified: true,
            verification_details: String::new(),
            grounding: None,
        }
    }

    #[test]
    fn test_report_file_name() {
        let at = Utc.timestamp_millis_opt(1_760_781_600_123).unwrap();
        assert_eq!(report_file_name(at), "MrDaniel_Report_1760781600123.csv");
    }

    #[tokio::test]
    async fn test_export_twice_is_byte_identical() {
        let sink = Arc::new(MemorySink::default());
        let clock = Arc::new(FixedClock(Utc.timestamp_millis_opt(42).unwrap()));
        let service = ExportService::new(sink.clone(), clock);
        let items = vec![item()];

        service.export(&items).await.unwrap();
        service.export(&items).await.unwrap();

        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].0, "MrDaniel_Report_42.csv");
        assert_eq!(saved[0].1, saved[1].1);
        assert!(saved[0].1.contains("\"Grid stable\",Energy,YES,09:00,https://n/1"));
    }

    #[tokio::test]
    async fn test_export_empty_list_writes_header_only() {
        let sink = Arc::new(MemorySink::default());
        let clock = Arc::new(FixedClock(Utc.timestamp_millis_opt(7).unwrap()));
        let service = ExportService::new(sink.clone(), clock);

        let path = service.export(&[]).await.unwrap();

        assert_eq!(path, PathBuf::from("MrDaniel_Report_7.csv"));
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].1, "Title,Category,Verified,Time,URL\n");
    }
}
