//! End-to-end flows over a scripted backend: recommendations into detail,
//! ad-hoc exploration, and a report job from request to delivered PDF.

use std::{cell::RefCell, rc::Rc};

use futures::executor::block_on;
use serde_json::json;
use time::macros::date;
use ui::api::{endpoints, ApiClient, LoadState, ScriptedTransport, UNKNOWN_UNIT};
use ui::core::config::ApiConfig;
use ui::recommendations::{open_detail, run_exploration, ExplorationError};
use ui::report::{
    CancelToken, Delivery, PlatformRasterizer, ReportError, ReportPipeline, ReportRequest,
    ReportSink, SettlePolicy,
};

fn api(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
    ApiClient::with_transport(ApiConfig::new("http://api.test"), transport.clone())
}

fn top_clusters() -> serde_json::Value {
    json!({
        "status": "success",
        "last_run": "2026-10-01 08:00",
        "data": [{
            "cluster_id": 3,
            "skor_kolaborasi": 0.87,
            "jumlah_inovasi": 12,
            "inovasi_1": { "id": 11, "judul": "E-Health", "urusan": "Kesehatan", "tahap": "Penerapan", "kematangan": "Matang" },
            "inovasi_2": { "id": 12, "judul": "SIAK Terpadu", "urusan": "Kependudukan", "tahap": "Uji Coba", "kematangan": "Cukup" }
        }]
    })
}

#[derive(Default, Clone)]
struct MemorySink {
    files: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
}

impl ReportSink for MemorySink {
    async fn deliver(&self, filename: &str, bytes: Vec<u8>) -> Result<Delivery, ReportError> {
        self.files.borrow_mut().push((filename.to_string(), bytes));
        Ok(Delivery::Downloaded {
            filename: filename.to_string(),
        })
    }
}

fn pipeline(
    transport: &ScriptedTransport,
) -> ReportPipeline<ScriptedTransport, PlatformRasterizer, MemorySink> {
    ReportPipeline::new(api(transport), PlatformRasterizer::default(), MemorySink::default())
        .with_settle(SettlePolicy::immediate())
        .with_date(date!(2026 - 10 - 17))
}

#[test]
fn opening_a_recommendation_recovers_owning_units() {
    let transport = ScriptedTransport::new()
        .json(endpoints::TOP_CLUSTERS, top_clusters())
        .json(
            endpoints::INNOVATION_LIST,
            json!([
                { "id": 11, "judul_inovasi": "E-Health", "admin_opd": "Dinas Kesehatan" },
                { "id": 99, "judul_inovasi": "Lainnya", "admin_opd": "Bappeda" }
            ]),
        );
    let api = api(&transport);

    let list = block_on(api.top_recommendations(10)).unwrap();
    assert_eq!(list.items.len(), 1);
    let detail = block_on(open_detail(&api, &list.items[0]));

    assert_eq!(detail.cluster_id, 3);
    assert_eq!(detail.percentage(), 87);
    assert_eq!(detail.side_a.owning_unit, "Dinas Kesehatan");
    assert_eq!(detail.side_b.owning_unit, UNKNOWN_UNIT);
    assert_eq!(transport.count_matching(endpoints::INNOVATION_LIST), 1);
}

#[test]
fn detail_still_opens_when_the_catalogue_is_down() {
    let transport = ScriptedTransport::new()
        .json(endpoints::TOP_CLUSTERS, top_clusters())
        .unreachable(endpoints::INNOVATION_LIST);
    let api = api(&transport);

    let list = block_on(api.top_recommendations(10)).unwrap();
    let detail = block_on(open_detail(&api, &list.items[0]));
    assert_eq!(detail.side_a.owning_unit, UNKNOWN_UNIT);
    assert_eq!(detail.side_b.owning_unit, UNKNOWN_UNIT);
    assert_eq!(detail.side_a.title, "E-Health");
}

#[test]
fn exploring_the_same_innovation_twice_sends_nothing() {
    let transport = ScriptedTransport::new();
    let err = block_on(run_exploration(&api(&transport), &[], Some(5), Some(5))).unwrap_err();
    assert_eq!(err, ExplorationError::SameInnovation);
    assert_eq!(err.to_string(), "Pilih dua inovasi yang berbeda");
    assert_eq!(transport.count_matching(endpoints::SIMULATE), 0);
}

#[test]
fn exploration_result_is_normalized() {
    let transport = ScriptedTransport::new().json(
        endpoints::SIMULATE,
        json!({
            "inovasi_1": { "id": 1, "judul": "E-Health", "opd": "Dinkes" },
            "inovasi_2": { "id": 2, "judul": "SIAK", "opd": "Dispendukcapil" },
            "skor_kecocokan": 91.5,
            "hasil_ai": {
                "judul_kolaborasi": "Integrasi Data Layanan",
                "manfaat_kolaborasi": "Efisiensi",
                "potensi_dampak": ["Layanan lebih cepat", "Data tunggal"],
                "alasan_sinergi": "Saling melengkapi",
                "tingkat_kolaborasi": "Kolaborasi Strategis"
            }
        }),
    );
    let result = block_on(run_exploration(&api(&transport), &[], Some(1), Some(2))).unwrap();
    assert_eq!(result.score_percent, 92);
    assert_eq!(result.benefits, vec!["Efisiensi".to_string()]);
    assert_eq!(result.impacts.len(), 2);
    assert_eq!(result.side_b.owning_unit, "Dispendukcapil");
    assert_eq!(transport.count_matching("inovasi_1_id=1&inovasi_2_id=2"), 1);
}

#[test]
fn exploration_without_echoed_sides_and_catalogue_shows_unknown_units() {
    let transport = ScriptedTransport::new().json(
        endpoints::SIMULATE,
        json!({
            "skor_kecocokan": 40,
            "hasil_ai": {
                "judul_kolaborasi": "Berbagi Data",
                "manfaat_kolaborasi": ["Efisiensi"],
                "potensi_dampak": "Sedang",
                "alasan_sinergi": "Data serupa",
                "tingkat_kolaborasi": "Kolaborasi Parsial"
            }
        }),
    );
    let result = block_on(run_exploration(&api(&transport), &[], Some(3), Some(4))).unwrap();
    assert_eq!(result.score_percent, 40);
    assert_eq!((result.side_a.id, result.side_b.id), (3, 4));
    assert_eq!(result.side_a.owning_unit, UNKNOWN_UNIT);
    assert_eq!(result.side_b.owning_unit, UNKNOWN_UNIT);
}

#[test]
fn empty_clustering_is_a_notice_not_an_error() {
    let transport = ScriptedTransport::new().json(
        endpoints::TOP_CLUSTERS,
        json!({ "status": "empty", "message": "Clustering belum dijalankan" }),
    );
    let state = LoadState::from_result(
        block_on(api(&transport).top_recommendations(10)),
        "Gagal memuat rekomendasi",
    );
    assert_eq!(state, LoadState::Empty("Clustering belum dijalankan".into()));
}

#[test]
fn preloaded_recommendation_report_is_rendered_and_delivered() {
    let transport = ScriptedTransport::new().json(endpoints::TOP_CLUSTERS, top_clusters());
    let list = block_on(api(&transport).top_recommendations(10)).unwrap();
    let pipeline = pipeline(&transport);

    let request = ReportRequest::AiRecommendation {
        preloaded: Some(list),
    };
    let mut last = 0;
    let delivery = block_on(pipeline.run(&request, &CancelToken::new(), |s| last = s.percent))
        .unwrap();

    assert_eq!(last, 100);
    assert_eq!(
        delivery,
        Delivery::Downloaded {
            filename: "BRIDA_Rekomendasi_EHealth_SIAK Terpadu_2026-10-17.pdf".into()
        }
    );
    // preloaded data means no second top-clusters fetch
    assert_eq!(transport.count_matching(endpoints::TOP_CLUSTERS), 1);
    let files = pipeline.sink().files.borrow();
    assert_eq!(files.len(), 1);
    assert!(files[0].1.starts_with(b"%PDF-"));
}

#[test]
fn dashboard_report_without_stats_delivers_nothing() {
    let transport = ScriptedTransport::new()
        .json(endpoints::MATURITY, json!([]))
        .json(endpoints::TOP_UNITS, json!([]))
        .json(endpoints::TOP_DOMAINS, json!([]))
        .respond(endpoints::STATS, 500, "");
    let pipeline = pipeline(&transport);

    let err = block_on(pipeline.run(
        &ReportRequest::Dashboard { year: None },
        &CancelToken::new(),
        |_| {},
    ))
    .unwrap_err();

    assert!(matches!(err, ReportError::Fetch(_)));
    assert!(pipeline.sink().files.borrow().is_empty());
}
