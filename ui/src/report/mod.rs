//! PDF reports: compose page fragments, rasterize them, assemble a PDF and
//! hand it to the platform.

mod color;
mod compose;
mod download;
mod error;
mod job;
mod layout;
mod modal;
mod pdf;
mod pipeline;
mod raster;
mod settle;
mod text;
mod variants;

pub use color::sanitize_colors;
pub use download::{report_filename, Delivery, DownloadSink, ReportSink};
pub use error::ReportError;
pub use job::{checkpoints, CancelToken, JobStatus, Phase};
pub use layout::{PageFragment, PageLayout, PageSize, ScratchRegion};
pub use modal::ReportModal;
pub use pdf::PdfDocument;
pub use pipeline::ReportPipeline;
pub use raster::{Bitmap, PlatformRasterizer, Rasterizer};
pub use settle::SettlePolicy;
pub use variants::{AnalyticsReport, DashboardReport, ReportContent, ReportPlan, ReportRequest};
