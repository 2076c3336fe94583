//! CSV downloads served straight from backend bytes.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Applications,
    Candidates,
}

impl ExportKind {
    fn as_str(self) -> &'static str {
        match self {
            ExportKind::Applications => "applications",
            ExportKind::Candidates => "candidates",
        }
    }
}

pub fn export_file_name(kind: ExportKind, now: DateTime<Utc>) -> String {
    format!("pixwik-{}-{}.csv", kind.as_str(), now.timestamp_millis())
}

#[derive(Debug, Clone)]
pub struct CsvDownload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl CsvDownload {
    pub fn new(kind: ExportKind, bytes: Bytes) -> Self {
        Self {
            file_name: export_file_name(kind, Utc::now()),
            bytes,
        }
    }
}

impl IntoResponse for CsvDownload {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}
