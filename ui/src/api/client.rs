//! Endpoint loaders over a pluggable HTTP transport.

use std::future::Future;

use futures::try_join;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    error::FetchError,
    models::{
        normalize_trend, AiInsight, CollaborationInsight, DashboardCore, DashboardStats,
        ExplorationResult, Innovation, InsightRow, MaturityBucket, RankedCount,
        RecommendationList, SimulateResponse, StatusProbe, TopClustersEnvelope, TrendPoint,
        TrendRow,
    },
};
use crate::core::config::ApiConfig;

pub mod endpoints {
    pub const INNOVATION_LIST: &str = "/dashboard/inovasi-list";
    pub const TOP_CLUSTERS: &str = "/api/recommendations/top-clusters";
    pub const SIMULATE: &str = "/ai-input-collaboration/simulate";
    pub const AI_COLLABORATION: &str = "/dashboard/ai-collaboration";
    pub const MATURITY: &str = "/dashboard/maturity";
    pub const TOP_UNITS: &str = "/dashboard/top-opd";
    pub const TOP_DOMAINS: &str = "/dashboard/top-urusan";
    pub const STATS: &str = "/dashboard/stats";
    pub const TREND: &str = "/dashboard/trend";
    pub const AI_INSIGHT: &str = "/dashboard/ai-insight";
}

pub const DEFAULT_EMPTY_RECOMMENDATIONS: &str =
    "Belum ada rekomendasi tersedia. Clustering mungkin belum dijalankan.";
pub const DEFAULT_NOT_FOUND: &str = "Data tidak ditemukan";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One GET round trip. Implemented by `reqwest` in production and by
/// [`super::scripted::ScriptedTransport`] in tests.
pub trait HttpGet {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, FetchError>>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpGet for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let transport_err = |err: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        };
        let resp = self.client.get(url).send().await.map_err(transport_err)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport_err)?;
        Ok(HttpResponse { status, body })
    }
}

/// Typed access to the backend. Cheap to clone; views keep one in context.
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    config: ApiConfig,
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }
}

impl<T: HttpGet> ApiClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let resp = self.transport.get(url).await.inspect_err(|err| {
            warn!(%url, "request failed: {err}");
        })?;
        if !resp.is_success() {
            warn!(%url, status = resp.status, "non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status,
            });
        }
        Ok(resp.body)
    }

    async fn fetch_json<D: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &str,
    ) -> Result<D, FetchError> {
        let url = format!("{}{query}", self.config.endpoint(endpoint));
        let body = self.fetch_text(&url).await?;
        serde_json::from_str(&body).map_err(|source| {
            warn!(endpoint, "decode failed: {source}");
            FetchError::Decode { endpoint, source }
        })
    }

    pub async fn innovations(&self) -> Result<Vec<Innovation>, FetchError> {
        self.fetch_json(endpoints::INNOVATION_LIST, "").await
    }

    /// Ranked recommendations. `status: "empty"` or an empty `data` array is
    /// reported as [`FetchError::Empty`] carrying the server message.
    pub async fn top_recommendations(
        &self,
        limit: usize,
    ) -> Result<RecommendationList, FetchError> {
        let envelope: TopClustersEnvelope = self
            .fetch_json(endpoints::TOP_CLUSTERS, &format!("?limit={limit}"))
            .await?;
        match envelope.status.as_deref() {
            Some("error") => {
                return Err(FetchError::Server(
                    envelope
                        .message
                        .unwrap_or_else(|| DEFAULT_NOT_FOUND.to_string()),
                ))
            }
            Some("empty") => {
                return Err(FetchError::Empty(
                    envelope
                        .message
                        .unwrap_or_else(|| DEFAULT_EMPTY_RECOMMENDATIONS.to_string()),
                ))
            }
            _ => {}
        }
        if envelope.data.is_empty() {
            return Err(FetchError::Empty(
                envelope
                    .message
                    .unwrap_or_else(|| DEFAULT_EMPTY_RECOMMENDATIONS.to_string()),
            ));
        }
        Ok(RecommendationList {
            items: envelope.data,
            last_run: envelope.last_run,
        })
    }

    /// The result carries the requested ids; titles and units are only set
    /// when the backend echoes them.
    pub async fn simulate(&self, first: u64, second: u64) -> Result<ExplorationResult, FetchError> {
        let resp: SimulateResponse = self
            .fetch_json(
                endpoints::SIMULATE,
                &format!("?inovasi_1_id={first}&inovasi_2_id={second}"),
            )
            .await?;
        let mut result = ExplorationResult::from(resp);
        result.side_a.id = first;
        result.side_b.id = second;
        Ok(result)
    }

    /// AI analysis of a recommended pair. A `status` of `error`/`empty` in a
    /// 200 payload is surfaced as [`FetchError::Server`].
    pub async fn ai_collaboration(
        &self,
        first: u64,
        second: u64,
    ) -> Result<CollaborationInsight, FetchError> {
        let value: serde_json::Value = self
            .fetch_json(
                endpoints::AI_COLLABORATION,
                &format!("?inovasi_1={first}&inovasi_2={second}"),
            )
            .await?;
        let probe: StatusProbe = serde_json::from_value(value.clone()).map_err(|source| {
            FetchError::Decode {
                endpoint: endpoints::AI_COLLABORATION,
                source,
            }
        })?;
        if matches!(probe.status.as_deref(), Some("error") | Some("empty")) {
            return Err(FetchError::Server(
                probe
                    .message
                    .unwrap_or_else(|| DEFAULT_NOT_FOUND.to_string()),
            ));
        }
        serde_json::from_value(value).map_err(|source| FetchError::Decode {
            endpoint: endpoints::AI_COLLABORATION,
            source,
        })
    }

    pub async fn maturity(&self) -> Result<Vec<MaturityBucket>, FetchError> {
        self.fetch_json(endpoints::MATURITY, "").await
    }

    pub async fn top_units(&self) -> Result<Vec<RankedCount>, FetchError> {
        self.fetch_json(endpoints::TOP_UNITS, "").await
    }

    pub async fn top_domains(&self) -> Result<Vec<RankedCount>, FetchError> {
        self.fetch_json(endpoints::TOP_DOMAINS, "").await
    }

    pub async fn stats(&self) -> Result<DashboardStats, FetchError> {
        self.fetch_json(endpoints::STATS, "").await
    }

    /// Yearly series without a year, twelve zero-filled months with one.
    pub async fn trend(&self, year: Option<i32>) -> Result<Vec<TrendPoint>, FetchError> {
        let query = year.map(|y| format!("?tahun={y}")).unwrap_or_default();
        let rows: Vec<TrendRow> = self.fetch_json(endpoints::TREND, &query).await?;
        Ok(normalize_trend(rows, year.is_some()))
    }

    pub async fn ai_insight(&self) -> Result<Vec<AiInsight>, FetchError> {
        let rows: Vec<InsightRow> = self.fetch_json(endpoints::AI_INSIGHT, "").await?;
        Ok(rows.into_iter().map(AiInsight::from).collect())
    }

    /// Insight section loader: any failure collapses to a single warning.
    pub async fn ai_insight_or_fallback(&self) -> Vec<AiInsight> {
        match self.ai_insight().await {
            Ok(insights) if !insights.is_empty() => insights,
            Ok(_) => vec![AiInsight::unavailable()],
            Err(err) => {
                warn!("ai insight unavailable: {err}");
                vec![AiInsight::unavailable()]
            }
        }
    }

    /// Trend section loader: failures render as an empty chart.
    pub async fn trend_or_empty(&self, year: Option<i32>) -> Vec<TrendPoint> {
        self.trend(year).await.unwrap_or_else(|err| {
            warn!("trend unavailable: {err}");
            Vec::new()
        })
    }

    /// The four core aggregates, fetched concurrently. Any failure fails the
    /// whole join so the view never shows a partial header.
    pub async fn dashboard_core(&self) -> Result<DashboardCore, FetchError> {
        let (maturity, top_units, top_domains, stats) = try_join!(
            self.maturity(),
            self.top_units(),
            self.top_domains(),
            self.stats()
        )?;
        Ok(DashboardCore {
            maturity,
            top_units,
            top_domains,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scripted::ScriptedTransport;
    use futures::executor::block_on;
    use serde_json::json;

    fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
        ApiClient::with_transport(ApiConfig::default(), transport)
    }

    fn pair(cluster: u64, score: f64) -> serde_json::Value {
        json!({
            "cluster_id": cluster,
            "skor_kolaborasi": score,
            "jumlah_inovasi": 2,
            "inovasi_1": {"id": cluster * 10, "judul": format!("A{cluster}")},
            "inovasi_2": {"id": cluster * 10 + 1, "judul": format!("B{cluster}")},
        })
    }

    #[test]
    fn recommendations_keep_response_order() {
        let transport = ScriptedTransport::new().json(
            endpoints::TOP_CLUSTERS,
            json!({"status": "ok", "total": 3, "data": [pair(7, 0.72), pair(2, 0.95), pair(4, 0.5)], "last_run": "2026-01-05T08:04:09"}),
        );
        let api = client(transport.clone());
        let list = block_on(api.top_recommendations(5)).unwrap();
        let ids: Vec<u64> = list.items.iter().map(|r| r.cluster_id).collect();
        assert_eq!(ids, vec![7, 2, 4]);
        assert_eq!(list.last_run.as_deref(), Some("2026-01-05T08:04:09"));
        assert_eq!(
            transport.calls(),
            vec!["http://localhost:8000/api/recommendations/top-clusters?limit=5"]
        );
    }

    #[test]
    fn empty_status_carries_the_server_message() {
        let transport = ScriptedTransport::new().json(
            endpoints::TOP_CLUSTERS,
            json!({"status": "empty", "message": "Clustering belum dijalankan", "data": []}),
        );
        let err = block_on(client(transport).top_recommendations(5)).unwrap_err();
        assert!(matches!(err, FetchError::Empty(ref m) if m == "Clustering belum dijalankan"));
    }

    #[test]
    fn empty_data_without_message_uses_default() {
        let transport =
            ScriptedTransport::new().json(endpoints::TOP_CLUSTERS, json!({"data": []}));
        let err = block_on(client(transport).top_recommendations(5)).unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_EMPTY_RECOMMENDATIONS);
    }

    #[test]
    fn http_failures_are_status_errors() {
        let transport = ScriptedTransport::new().respond(endpoints::STATS, 500, "boom");
        let err = block_on(client(transport).stats()).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[test]
    fn string_numbers_in_stats_are_coerced() {
        let transport = ScriptedTransport::new().json(
            endpoints::STATS,
            json!({"total_inovasi": "120", "rata_kematangan": "3.45", "inovasi_digital": 80, "inovasi_tahun_ini": null}),
        );
        let stats = block_on(client(transport).stats()).unwrap();
        assert_eq!(stats.total, 120);
        assert_eq!(stats.average_maturity, 3.45);
        assert_eq!(stats.new_this_year, 0);
    }

    #[test]
    fn ai_collaboration_error_status_is_surfaced() {
        let transport = ScriptedTransport::new().json(
            endpoints::AI_COLLABORATION,
            json!({"status": "error", "message": "AI sedang sibuk"}),
        );
        let err = block_on(client(transport).ai_collaboration(1, 2)).unwrap_err();
        assert_eq!(err.user_message("x"), "AI sedang sibuk");

        let transport = ScriptedTransport::new()
            .json(endpoints::AI_COLLABORATION, json!({"status": "empty"}));
        let err = block_on(client(transport).ai_collaboration(1, 2)).unwrap_err();
        assert_eq!(err.user_message("x"), DEFAULT_NOT_FOUND);
    }

    #[test]
    fn ai_collaboration_decodes_lists() {
        let transport = ScriptedTransport::new().json(
            endpoints::AI_COLLABORATION,
            json!({
                "judul_kolaborasi": "Satu Data Kesehatan",
                "opd_terlibat": ["Dinkes", "Diskominfo"],
                "alasan_kesesuaian": "Data saling melengkapi",
                "manfaat": "Efisiensi",
                "potensi_dampak": ["Layanan lebih cepat"],
                "tingkat_rekomendasi": "Kolaborasi Strategis"
            }),
        );
        let transport_log = transport.clone();
        let insight = block_on(client(transport).ai_collaboration(3, 9)).unwrap();
        assert_eq!(insight.involved_units.len(), 2);
        assert_eq!(insight.benefits, vec!["Efisiensi"]);
        assert!(transport_log.calls()[0].ends_with("?inovasi_1=3&inovasi_2=9"));
    }

    #[test]
    fn dashboard_core_is_all_or_nothing() {
        let transport = ScriptedTransport::new()
            .json(endpoints::MATURITY, json!([{"level": "Inisiatif", "jumlah": 3}]))
            .json(endpoints::TOP_UNITS, json!([{"name": "Dinkes", "jumlah": "9"}]))
            .json(endpoints::TOP_DOMAINS, json!([]))
            .respond(endpoints::STATS, 503, "");
        let err = block_on(client(transport).dashboard_core()).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[test]
    fn insight_failures_fall_back_to_a_warning() {
        let transport = ScriptedTransport::new().unreachable(endpoints::AI_INSIGHT);
        let insights = block_on(client(transport).ai_insight_or_fallback());
        assert_eq!(insights, vec![AiInsight::unavailable()]);
    }

    #[test]
    fn trend_with_year_is_monthly() {
        let transport = ScriptedTransport::new().json(
            "/dashboard/trend?tahun=2024",
            json!([{"bulan": 2, "digital": 1, "nondigital": 1, "teknologi": 0}]),
        );
        let points = block_on(client(transport).trend(Some(2024))).unwrap();
        assert_eq!(points.len(), 12);
        assert_eq!(points[1].total(), 2);
    }
}
