use thiserror::Error;

use crate::api::FetchError;

pub const GENERIC_FAILURE: &str = "Terjadi kesalahan saat membuat PDF. Silakan coba lagi.";
pub const MISSING_CONTENT: &str = "Error: Konten laporan tidak ditemukan. Silakan coba lagi.";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report data unavailable: {0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    NoData(String),

    #[error("page fragment `{0}` was not rendered")]
    MissingPage(String),

    #[error("page fragment `{0}` has zero size")]
    EmptyPage(String),

    #[error("capture failed: {0}")]
    Capture(String),

    #[error("could not assemble PDF: {0}")]
    Assemble(String),

    #[error("could not save PDF: {0}")]
    Delivery(String),

    #[error("report job cancelled")]
    Cancelled,
}

impl ReportError {
    /// Text for the alert shown before the modal closes.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Fetch(err) => format!(
                "Gagal memuat data laporan: {}",
                err.user_message("periksa koneksi ke server")
            ),
            Self::NoData(message) => message.clone(),
            Self::MissingPage(_) | Self::EmptyPage(_) => MISSING_CONTENT.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_failures_share_the_missing_content_alert() {
        assert_eq!(
            ReportError::MissingPage("report-page-2".into()).alert_message(),
            MISSING_CONTENT
        );
        assert_eq!(
            ReportError::EmptyPage("report-page-1".into()).alert_message(),
            MISSING_CONTENT
        );
        assert_eq!(
            ReportError::Capture("boom".into()).alert_message(),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn fetch_failures_mention_data() {
        let err = ReportError::from(FetchError::Status {
            url: "http://x/dashboard/stats".into(),
            status: 500,
        });
        assert!(err.alert_message().starts_with("Gagal memuat data laporan"));
        assert!(!err.is_cancelled());
    }
}
