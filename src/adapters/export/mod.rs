//! Report export: CSV rendering and the filesystem sink.

pub mod csv_report;
pub mod fs_report;

pub use csv_report::news_to_csv;
pub use fs_report::FsReportSink;
