//! Delivery of finished PDFs: a browser download on web, a file in the
//! per-user exports directory on desktop.

use std::future::Future;

use time::Date;

use super::error::ReportError;
use crate::core::format::{filename_fragment, format_iso_date};

/// Max characters kept from each title in a filename.
pub const FILENAME_FRAGMENT_CHARS: usize = 25;

/// `BRIDA_<tag>_<ident...>_<YYYY-MM-DD>.pdf`. Identifiers are reduced to ASCII
/// letters, digits and spaces; blank ones are skipped.
pub fn report_filename(tag: &str, idents: &[&str], date: Date) -> String {
    let mut parts = vec!["BRIDA".to_string(), tag.to_string()];
    parts.extend(
        idents
            .iter()
            .map(|raw| filename_fragment(raw, FILENAME_FRAGMENT_CHARS))
            .filter(|part| !part.is_empty()),
    );
    parts.push(format_iso_date(date));
    format!("{}.pdf", parts.join("_"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Browser download triggered.
    Downloaded { filename: String },
    /// Written to disk.
    Saved { path: String },
}

impl Delivery {
    pub fn describe(&self) -> String {
        match self {
            Delivery::Downloaded { filename } => format!("Unduhan {filename} dimulai"),
            Delivery::Saved { path } => format!("PDF disimpan di {path}"),
        }
    }
}

pub trait ReportSink {
    fn deliver(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<Delivery, ReportError>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSink;

impl ReportSink for DownloadSink {
    async fn deliver(&self, filename: &str, bytes: Vec<u8>) -> Result<Delivery, ReportError> {
        download_bytes(filename, "application/pdf", bytes)
            .await
            .map_err(ReportError::Delivery)
    }
}

async fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Delivery, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let mut opts = BlobPropertyBag::new();
        opts.type_(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(Delivery::Downloaded {
            filename: filename.to_string(),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        fs::write(&path, &bytes).map_err(|err| err.to_string())?;
        Ok(Delivery::Saved {
            path: path.to_string_lossy().to_string(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("id.go.jatimprov", "BRIDA", "Sinergi")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}
