//! The report job: fetch, compose, settle, verify, capture, assemble, deliver.
//!
//! Progress is reported through a callback at fixed checkpoints and the
//! cancellation token is consulted after every suspension point, so closing
//! the modal stops the job before it produces a file.

use time::Date;
use tracing::{debug, info, warn};

use super::{
    color::sanitize_colors,
    download::{Delivery, DownloadSink, ReportSink},
    error::ReportError,
    job::{checkpoints, CancelToken, JobStatus, Phase},
    layout::{PageFragment, PageLayout, ScratchRegion},
    pdf::{one_per_page, slice_into_pages, PdfDocument},
    raster::{PlatformRasterizer, Rasterizer},
    settle::{SettlePolicy, CAPTURE_SCALE},
    variants::{ReportPlan, ReportRequest},
};
use crate::{
    api::{ApiClient, HttpGet, HttpTransport},
    core::{format, timing::sleep_ms},
};

pub struct ReportPipeline<T = HttpTransport, R = PlatformRasterizer, S = DownloadSink> {
    api: ApiClient<T>,
    rasterizer: R,
    sink: S,
    settle: SettlePolicy,
    today: Option<Date>,
}

impl<T: HttpGet> ReportPipeline<T, PlatformRasterizer, DownloadSink> {
    pub fn for_platform(api: ApiClient<T>) -> Self {
        Self::new(api, PlatformRasterizer::default(), DownloadSink)
    }
}

impl<T: HttpGet, R: Rasterizer, S: ReportSink> ReportPipeline<T, R, S> {
    pub fn new(api: ApiClient<T>, rasterizer: R, sink: S) -> Self {
        Self {
            api,
            rasterizer,
            sink,
            settle: SettlePolicy::standard(),
            today: None,
        }
    }

    pub fn with_settle(mut self, settle: SettlePolicy) -> Self {
        self.settle = settle;
        self
    }

    /// Pin the print date instead of reading the clock.
    pub fn with_date(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn run(
        &self,
        request: &ReportRequest,
        token: &CancelToken,
        mut progress: impl FnMut(JobStatus),
    ) -> Result<Delivery, ReportError> {
        let plan = request.plan();
        let today = self.today.unwrap_or_else(format::today);
        info!(tag = plan.tag, "report job started");

        progress(JobStatus::new(
            Phase::LoadingData,
            checkpoints::FETCH,
            "Memuat data laporan...",
        ));
        let content = request.load(&self.api).await;
        token.check()?;
        let content = content?;

        let scratch = content.compose(today);
        let filename = content.filename(plan.tag, today);
        self.render(&plan, &scratch, &filename, token, &mut progress)
            .await
    }

    /// Everything after composition. Exposed so a prepared scratch region can
    /// be checked against a plan directly.
    pub async fn render(
        &self,
        plan: &ReportPlan,
        scratch: &ScratchRegion,
        filename: &str,
        token: &CancelToken,
        progress: &mut impl FnMut(JobStatus),
    ) -> Result<Delivery, ReportError> {
        progress(JobStatus::new(
            Phase::WaitingRender,
            checkpoints::COMPOSE,
            "Menunggu render komponen...",
        ));
        sleep_ms(self.settle.initial_ms).await;
        token.check()?;
        if plan.is_single_canvas() {
            sleep_ms(self.settle.chart_ms).await;
            token.check()?;
        }

        progress(JobStatus::new(
            Phase::WaitingRender,
            checkpoints::VERIFY,
            "Memverifikasi elemen visual...",
        ));
        let pages = scratch.verify(&plan.expected_pages).inspect_err(|err| {
            warn!(tag = plan.tag, %err, "scratch region incomplete");
        })?;

        let captures = self.capture(&pages, token, progress).await?;

        progress(JobStatus::new(
            Phase::Converting,
            checkpoints::CONVERT,
            "Menyusun dokumen PDF...",
        ));
        let bytes = assemble(plan, &captures)?;
        token.check()?;

        progress(JobStatus::new(
            Phase::Saving,
            checkpoints::SAVE,
            "Menyimpan file...",
        ));
        let delivery = self.sink.deliver(filename, bytes).await;
        token.check()?;
        let delivery = delivery?;

        progress(JobStatus::new(Phase::Done, checkpoints::DONE, "Selesai!"));
        info!(tag = plan.tag, filename, "report delivered");
        Ok(delivery)
    }

    async fn capture(
        &self,
        pages: &[&PageFragment],
        token: &CancelToken,
        progress: &mut impl FnMut(JobStatus),
    ) -> Result<Vec<super::raster::Bitmap>, ReportError> {
        let mut captures = Vec::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            if idx > 0 {
                sleep_ms(self.settle.between_pages_ms).await;
                token.check()?;
            }
            progress(JobStatus::new(
                Phase::Capturing,
                checkpoints::page(idx, pages.len()),
                capture_message(idx),
            ));
            let sanitized = PageFragment {
                svg: sanitize_colors(&page.svg),
                ..(*page).clone()
            };
            let bitmap = self.rasterizer.rasterize(&sanitized, CAPTURE_SCALE).await;
            token.check()?;
            let bitmap = bitmap?;
            debug!(
                page = %page.id,
                width = bitmap.width,
                height = bitmap.height,
                "captured page fragment"
            );
            captures.push(bitmap);
        }
        Ok(captures)
    }
}

fn capture_message(idx: usize) -> String {
    match idx {
        0 => "Membuat screenshot halaman...".to_string(),
        1 => "Membuat halaman kedua...".to_string(),
        n => format!("Membuat halaman {}...", n + 1),
    }
}

fn assemble(plan: &ReportPlan, captures: &[super::raster::Bitmap]) -> Result<Vec<u8>, ReportError> {
    let mut doc = PdfDocument::new(plan.page_size, plan.title);
    match plan.layout {
        PageLayout::SingleCanvas => {
            for bitmap in captures {
                let image = doc.add_image(bitmap)?;
                slice_into_pages(&mut doc, image, bitmap.width, bitmap.height)?;
            }
        }
        PageLayout::Fragments { margin_mm } => {
            let mut images = Vec::with_capacity(captures.len());
            for bitmap in captures {
                images.push((doc.add_image(bitmap)?, bitmap.width, bitmap.height));
            }
            one_per_page(&mut doc, &images, margin_mm)?;
        }
    }
    debug!(pages = doc.pages().len(), "assembled report");
    doc.to_bytes()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;
    use serde_json::json;
    use time::macros::date;

    use super::*;
    use crate::{
        api::{endpoints, ExplorationResult, ExplorationSide, ScriptedTransport},
        core::config::ApiConfig,
        report::raster::Bitmap,
    };

    /// Paints a flat bitmap of the fragment's scaled size.
    #[derive(Default)]
    pub(crate) struct FlatRasterizer {
        pub seen: RefCell<Vec<String>>,
    }

    impl Rasterizer for FlatRasterizer {
        async fn rasterize(&self, fragment: &PageFragment, scale: f32) -> Result<Bitmap, ReportError> {
            self.seen.borrow_mut().push(fragment.svg.clone());
            let width = (fragment.width_px as f32 * scale) as u32;
            let height = (fragment.height_px as f32 * scale).min(64.0) as u32;
            Ok(Bitmap {
                width,
                height,
                rgba: vec![255; (width * height * 4) as usize],
            })
        }
    }

    #[derive(Default, Clone)]
    pub(crate) struct RecordingSink {
        pub files: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
    }

    impl ReportSink for RecordingSink {
        async fn deliver(&self, filename: &str, bytes: Vec<u8>) -> Result<Delivery, ReportError> {
            self.files.borrow_mut().push((filename.to_string(), bytes));
            Ok(Delivery::Downloaded {
                filename: filename.to_string(),
            })
        }
    }

    fn pipeline(
        transport: ScriptedTransport,
    ) -> ReportPipeline<ScriptedTransport, FlatRasterizer, RecordingSink> {
        ReportPipeline::new(
            ApiClient::with_transport(ApiConfig::new("http://api.test"), transport),
            FlatRasterizer::default(),
            RecordingSink::default(),
        )
        .with_settle(SettlePolicy::immediate())
        .with_date(date!(2026 - 10 - 17))
    }

    fn exploration() -> ExplorationResult {
        ExplorationResult {
            title: "Integrasi Data".into(),
            score_percent: 92,
            benefits: vec!["Efisiensi".into()],
            impacts: vec!["Layanan cepat".into()],
            rationale: "Saling melengkapi".into(),
            collaboration_level: "Replikasi Penuh".into(),
            side_a: ExplorationSide {
                id: 1,
                title: "E-Health".into(),
                owning_unit: "Dinkes".into(),
            },
            side_b: ExplorationSide {
                id: 2,
                title: "SIAK".into(),
                owning_unit: "Dispendukcapil".into(),
            },
        }
    }

    #[test]
    fn collaboration_report_walks_every_checkpoint() {
        let pipeline = pipeline(ScriptedTransport::new());
        let request = ReportRequest::Collaboration(Box::new(exploration()));
        let mut seen = Vec::new();
        let delivery = block_on(pipeline.run(&request, &CancelToken::new(), |s| {
            seen.push(s.percent)
        }))
        .unwrap();

        assert_eq!(seen, vec![10, 20, 40, 60, 70, 80, 95, 100]);
        assert_eq!(
            delivery,
            Delivery::Downloaded {
                filename: "BRIDA_Kolaborasi_EHealth_SIAK_2026-10-17.pdf".into()
            }
        );
        let files = pipeline.sink().files.borrow();
        assert_eq!(files.len(), 1);
        assert!(files[0].1.starts_with(b"%PDF-"));
        assert_eq!(pipeline.rasterizer.seen.borrow().len(), 2);
    }

    #[test]
    fn cancelled_job_delivers_nothing() {
        let pipeline = pipeline(ScriptedTransport::new());
        let token = CancelToken::new();
        let request = ReportRequest::Collaboration(Box::new(exploration()));
        let cancel = token.clone();
        let result = block_on(pipeline.run(&request, &token, move |s| {
            if s.percent >= checkpoints::VERIFY {
                cancel.cancel();
            }
        }));
        assert!(matches!(result, Err(ReportError::Cancelled)));
        assert!(pipeline.sink().files.borrow().is_empty());
    }

    #[test]
    fn failing_core_aggregate_aborts_before_capture() {
        let transport = ScriptedTransport::new()
            .json(endpoints::MATURITY, json!([]))
            .json(endpoints::TOP_UNITS, json!([]))
            .json(endpoints::TOP_DOMAINS, json!([]))
            .respond(endpoints::STATS, 500, "boom");
        let pipeline = pipeline(transport);
        let result = block_on(pipeline.run(
            &ReportRequest::Dashboard { year: None },
            &CancelToken::new(),
            |_| {},
        ));
        assert!(matches!(result, Err(ReportError::Fetch(_))));
        assert!(pipeline.rasterizer.seen.borrow().is_empty());
        assert!(pipeline.sink().files.borrow().is_empty());
    }

    #[test]
    fn missing_fragment_is_fatal() {
        let pipeline = pipeline(ScriptedTransport::new());
        let plan = ReportRequest::Collaboration(Box::new(exploration())).plan();
        let mut scratch = ScratchRegion::new();
        scratch.push(PageFragment {
            id: "report-page-1".into(),
            width_px: 794,
            height_px: 1050,
            svg: "<svg/>".into(),
        });
        let result = block_on(pipeline.render(
            &plan,
            &scratch,
            "x.pdf",
            &CancelToken::new(),
            &mut |_| {},
        ));
        assert!(matches!(result, Err(ReportError::MissingPage(id)) if id == "report-page-2"));
        assert!(pipeline.sink().files.borrow().is_empty());
    }

    #[test]
    fn unsupported_colors_never_reach_the_rasterizer() {
        let pipeline = pipeline(ScriptedTransport::new());
        let plan = ReportRequest::Collaboration(Box::new(exploration())).plan();
        let mut scratch = ScratchRegion::new();
        for id in ["report-page-1", "report-page-2"] {
            scratch.push(PageFragment {
                id: id.into(),
                width_px: 794,
                height_px: 1050,
                svg: r#"<svg><rect fill="oklch(0.5 0.1 200)"/></svg>"#.into(),
            });
        }
        block_on(pipeline.render(&plan, &scratch, "x.pdf", &CancelToken::new(), &mut |_| {}))
            .unwrap();
        for svg in pipeline.rasterizer.seen.borrow().iter() {
            assert!(!svg.contains("oklch"));
        }
    }

    #[test]
    fn dashboard_report_is_sliced_from_one_canvas() {
        let transport = ScriptedTransport::new()
            .json(endpoints::MATURITY, json!([{"level": "Matang", "jumlah": 3}]))
            .json(endpoints::TOP_UNITS, json!([{"name": "Dinkes", "jumlah": 5}]))
            .json(endpoints::TOP_DOMAINS, json!([{"name": "Kesehatan", "jumlah": 4}]))
            .json(
                endpoints::STATS,
                json!({"total_inovasi": 10, "rata_kematangan": 55.5, "inovasi_digital": 6, "inovasi_tahun_ini": 2}),
            )
            .unreachable(endpoints::TREND)
            .unreachable(endpoints::AI_INSIGHT);
        let pipeline = pipeline(transport);
        let delivery = block_on(pipeline.run(
            &ReportRequest::Dashboard { year: None },
            &CancelToken::new(),
            |_| {},
        ))
        .unwrap();
        assert_eq!(
            delivery,
            Delivery::Downloaded {
                filename: "BRIDA_Report_2026-10-17.pdf".into()
            }
        );
        let seen = pipeline.rasterizer.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("AI Insight tidak dapat dimuat saat ini"));
    }
}
