//! View models decoded from the backend's JSON payloads.
//!
//! Wire names are Indonesian (`judul_inovasi`, `skor_kolaborasi`); the Rust
//! side uses English field names and `serde(rename)` at the boundary.

use serde::{Deserialize, Serialize};

use super::decode;
use crate::core::{
    format::month_short_id,
    score::{percentage, ScoreTier},
};

/// A row of `/dashboard/inovasi-list`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Innovation {
    #[serde(deserialize_with = "decode::id")]
    pub id: u64,
    #[serde(rename = "judul_inovasi", default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(rename = "admin_opd", default, deserialize_with = "decode::optional_text")]
    pub owning_unit: Option<String>,
    #[serde(rename = "urusan_utama", default, deserialize_with = "decode::optional_text")]
    pub domain: Option<String>,
    #[serde(rename = "tahapan_inovasi", default, deserialize_with = "decode::optional_text")]
    pub stage: Option<String>,
    #[serde(rename = "label_kematangan", default, deserialize_with = "decode::optional_text")]
    pub maturity_label: Option<String>,
}

/// One side of a recommended pair, as embedded in `top-clusters` rows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct RecommendedInnovation {
    #[serde(deserialize_with = "decode::id")]
    pub id: u64,
    #[serde(rename = "judul", default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(rename = "urusan", default, deserialize_with = "decode::text")]
    pub domain: String,
    #[serde(rename = "tahap", default, deserialize_with = "decode::text")]
    pub stage: String,
    #[serde(rename = "kematangan", default, deserialize_with = "decode::text")]
    pub maturity_label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollaborationRecommendation {
    #[serde(deserialize_with = "decode::id")]
    pub cluster_id: u64,
    /// Similarity in `[0, 1]`.
    #[serde(rename = "skor_kolaborasi", default, deserialize_with = "decode::number")]
    pub score: f64,
    #[serde(rename = "jumlah_inovasi", default, deserialize_with = "decode::count")]
    pub innovation_count: u64,
    #[serde(rename = "inovasi_1")]
    pub innovation_a: RecommendedInnovation,
    #[serde(rename = "inovasi_2")]
    pub innovation_b: RecommendedInnovation,
}

impl CollaborationRecommendation {
    pub fn percentage(&self) -> u32 {
        percentage(self.score)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_fraction(self.score)
    }

    pub fn label(&self) -> &'static str {
        self.tier().label()
    }
}

/// Envelope of `/api/recommendations/top-clusters`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TopClustersEnvelope {
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<CollaborationRecommendation>,
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub last_run: Option<String>,
}

/// Ranked recommendations in response order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecommendationList {
    pub items: Vec<CollaborationRecommendation>,
    pub last_run: Option<String>,
}

impl RecommendationList {
    pub fn top(&self) -> Option<&CollaborationRecommendation> {
        self.items.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SimulatedSide {
    #[serde(default, deserialize_with = "decode::id")]
    pub id: u64,
    #[serde(rename = "judul", default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(rename = "opd", default, deserialize_with = "decode::text")]
    pub owning_unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SimulatedAi {
    #[serde(rename = "judul_kolaborasi", default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(rename = "manfaat_kolaborasi", default, deserialize_with = "decode::one_or_many")]
    pub benefits: Vec<String>,
    #[serde(rename = "potensi_dampak", default, deserialize_with = "decode::one_or_many")]
    pub impacts: Vec<String>,
    #[serde(rename = "alasan_sinergi", default, deserialize_with = "decode::joined_text")]
    pub rationale: String,
    #[serde(rename = "tingkat_kolaborasi", default, deserialize_with = "decode::text")]
    pub collaboration_level: String,
}

/// Payload of `/ai-input-collaboration/simulate`. Only the score and the AI
/// block are guaranteed; the sides are echoed by some backend versions.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SimulateResponse {
    #[serde(rename = "inovasi_1", default)]
    pub side_a: SimulatedSide,
    #[serde(rename = "inovasi_2", default)]
    pub side_b: SimulatedSide,
    #[serde(rename = "skor_kecocokan", default, deserialize_with = "decode::number")]
    pub score: f64,
    #[serde(rename = "hasil_ai")]
    pub ai: SimulatedAi,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExplorationSide {
    pub id: u64,
    pub title: String,
    pub owning_unit: String,
}

/// Result of an on-demand exploration of two innovations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExplorationResult {
    pub title: String,
    /// Percent (0–100) as returned by the simulate endpoint.
    pub score_percent: u32,
    pub benefits: Vec<String>,
    pub impacts: Vec<String>,
    pub rationale: String,
    pub collaboration_level: String,
    pub side_a: ExplorationSide,
    pub side_b: ExplorationSide,
}

impl ExplorationSide {
    /// Fill blank title and unit from the catalogue row with the same id.
    fn complete_from(&mut self, catalogue: &[Innovation]) {
        let row = catalogue.iter().find(|row| row.id == self.id);
        if self.title.is_empty() {
            if let Some(row) = row {
                self.title = row.title.clone();
            }
        }
        if self.owning_unit.is_empty() {
            self.owning_unit = row
                .and_then(|row| row.owning_unit.clone())
                .unwrap_or_else(|| UNKNOWN_UNIT.to_string());
        }
    }
}

impl ExplorationResult {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_percent(f64::from(self.score_percent))
    }

    /// Titles and owning units come from the locally loaded catalogue unless
    /// the backend echoed them.
    pub fn complete_sides(&mut self, catalogue: &[Innovation]) {
        self.side_a.complete_from(catalogue);
        self.side_b.complete_from(catalogue);
    }
}

impl From<SimulateResponse> for ExplorationResult {
    fn from(resp: SimulateResponse) -> Self {
        let side = |s: SimulatedSide| ExplorationSide {
            id: s.id,
            title: s.title,
            owning_unit: s.owning_unit,
        };
        Self {
            title: resp.ai.title,
            score_percent: resp.score.clamp(0.0, 100.0).round() as u32,
            benefits: resp.ai.benefits,
            impacts: resp.ai.impacts,
            rationale: resp.ai.rationale,
            collaboration_level: resp.ai.collaboration_level,
            side_a: side(resp.side_a),
            side_b: side(resp.side_b),
        }
    }
}

/// Printed under every AI-generated collaboration analysis.
pub const AI_ANALYSIS_DISCLAIMER: &str = "Analisis ini dihasilkan secara otomatis oleh sistem AI berdasarkan data inovasi yang tersedia. Hasil analisis bersifat rekomendasi dan perlu ditinjau lebih lanjut oleh pihak terkait sebelum implementasi.";

/// Payload of `/dashboard/ai-collaboration`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct CollaborationInsight {
    #[serde(rename = "judul_kolaborasi", default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(rename = "opd_terlibat", default, deserialize_with = "decode::one_or_many")]
    pub involved_units: Vec<String>,
    #[serde(rename = "alasan_kesesuaian", default, deserialize_with = "decode::joined_text")]
    pub rationale: String,
    #[serde(rename = "manfaat", default, deserialize_with = "decode::one_or_many")]
    pub benefits: Vec<String>,
    #[serde(rename = "potensi_dampak", default, deserialize_with = "decode::one_or_many")]
    pub impacts: Vec<String>,
    #[serde(rename = "tingkat_rekomendasi", default, deserialize_with = "decode::text")]
    pub recommendation_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatusProbe {
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub message: Option<String>,
}

/// Pair side enriched with its owning unit for the detail sub-view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailSide {
    pub id: u64,
    pub title: String,
    pub owning_unit: String,
    pub domain: String,
    pub stage: String,
    pub maturity_label: String,
}

/// A recommendation merged with owning units recovered from `inovasi-list`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollaborationDetailRecord {
    pub cluster_id: u64,
    pub score: f64,
    pub side_a: DetailSide,
    pub side_b: DetailSide,
}

pub const UNKNOWN_UNIT: &str = "N/A";

impl CollaborationDetailRecord {
    /// Merge a recommendation with the innovation catalogue. Units that cannot
    /// be found (or an empty catalogue after a failed fetch) become `"N/A"`.
    pub fn merge(rec: &CollaborationRecommendation, catalogue: &[Innovation]) -> Self {
        let side = |inner: &RecommendedInnovation| {
            let owning_unit = catalogue
                .iter()
                .find(|row| row.id == inner.id)
                .and_then(|row| row.owning_unit.clone())
                .unwrap_or_else(|| UNKNOWN_UNIT.to_string());
            DetailSide {
                id: inner.id,
                title: inner.title.clone(),
                owning_unit,
                domain: inner.domain.clone(),
                stage: inner.stage.clone(),
                maturity_label: inner.maturity_label.clone(),
            }
        };
        Self {
            cluster_id: rec.cluster_id,
            score: rec.score,
            side_a: side(&rec.innovation_a),
            side_b: side(&rec.innovation_b),
        }
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.score)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_fraction(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaturityBucket {
    #[serde(default, deserialize_with = "decode::text")]
    pub level: String,
    #[serde(rename = "jumlah", default, deserialize_with = "decode::count")]
    pub count: u64,
}

/// Top units / top domains rows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RankedCount {
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(rename = "jumlah", default, deserialize_with = "decode::count")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct DashboardStats {
    #[serde(rename = "total_inovasi", default, deserialize_with = "decode::count")]
    pub total: u64,
    #[serde(rename = "rata_kematangan", default, deserialize_with = "decode::number")]
    pub average_maturity: f64,
    #[serde(rename = "inovasi_digital", default, deserialize_with = "decode::count")]
    pub digital: u64,
    #[serde(rename = "inovasi_tahun_ini", default, deserialize_with = "decode::count")]
    pub new_this_year: u64,
}

/// Raw trend row: per-year (`tahun`) or per-month (`bulan`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TrendRow {
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub tahun: Option<String>,
    #[serde(default, deserialize_with = "decode::optional_text")]
    pub bulan: Option<String>,
    #[serde(default, deserialize_with = "decode::count")]
    pub digital: u64,
    #[serde(default, deserialize_with = "decode::count")]
    pub nondigital: u64,
    #[serde(default, deserialize_with = "decode::count")]
    pub teknologi: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendPoint {
    pub label: String,
    pub digital: u64,
    pub non_digital: u64,
    pub technology: u64,
}

impl TrendPoint {
    pub fn total(&self) -> u64 {
        self.digital + self.non_digital
    }
}

/// Turn raw trend rows into chart points. Monthly series are expanded to
/// twelve labelled months with gaps zero-filled; yearly series keep their order.
pub(crate) fn normalize_trend(rows: Vec<TrendRow>, monthly: bool) -> Vec<TrendPoint> {
    if monthly {
        let mut months: Vec<TrendPoint> = (1..=12u8)
            .map(|m| TrendPoint {
                label: month_short_id(m).to_string(),
                ..TrendPoint::default()
            })
            .collect();
        for row in rows {
            let Some(month) = row
                .bulan
                .as_deref()
                .and_then(|b| b.trim().parse::<f64>().ok())
                .map(|b| b as usize)
                .filter(|b| (1..=12).contains(b))
            else {
                continue;
            };
            let slot = &mut months[month - 1];
            slot.digital += row.digital;
            slot.non_digital += row.nondigital;
            slot.technology += row.teknologi;
        }
        months
    } else {
        rows.into_iter()
            .map(|row| TrendPoint {
                label: row
                    .tahun
                    .or(row.bulan)
                    .map(|t| t.trim_end_matches(".0").to_string())
                    .unwrap_or_default(),
                digital: row.digital,
                non_digital: row.nondigital,
                technology: row.teknologi,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsightKind {
    Success,
    Warning,
    #[default]
    Info,
}

impl InsightKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" | "positive" => Self::Success,
            "warning" | "danger" | "error" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "insight--success",
            Self::Warning => "insight--warning",
            Self::Info => "insight--info",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InsightRow {
    #[serde(default, deserialize_with = "decode::text")]
    pub icon: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub text: String,
    #[serde(rename = "type", default, deserialize_with = "decode::text")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiInsight {
    pub icon: String,
    pub text: String,
    pub kind: InsightKind,
}

impl From<InsightRow> for AiInsight {
    fn from(row: InsightRow) -> Self {
        Self {
            icon: row.icon,
            text: row.text,
            kind: InsightKind::parse(&row.kind),
        }
    }
}

impl AiInsight {
    /// The single insight shown when `/dashboard/ai-insight` fails.
    pub fn unavailable() -> Self {
        Self {
            icon: "⚠️".into(),
            text: "AI Insight tidak dapat dimuat saat ini".into(),
            kind: InsightKind::Warning,
        }
    }
}

/// The four aggregates joined for the dashboard header and charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardCore {
    pub maturity: Vec<MaturityBucket>,
    pub top_units: Vec<RankedCount>,
    pub top_domains: Vec<RankedCount>,
    pub stats: DashboardStats,
}

/// Filters applied on the analytics page and carried into its report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyticsFilters {
    pub year: Option<i32>,
    pub unit: Option<String>,
    pub kind: Option<String>,
    pub form: Option<String>,
}

impl AnalyticsFilters {
    /// Human readable summary lines (`Tahun: 2024`), "Semua" for unset filters.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let or_all = |v: &Option<String>| v.clone().unwrap_or_else(|| "Semua".into());
        vec![
            (
                "Tahun",
                self.year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "Semua".into()),
            ),
            ("OPD", or_all(&self.unit)),
            ("Jenis Inovasi", or_all(&self.kind)),
            ("Bentuk Inovasi", or_all(&self.form)),
        ]
    }

    pub fn is_unfiltered(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn innovation_rows_decode_with_nulls() {
        let row: Innovation = serde_json::from_value(json!({
            "id": 12,
            "judul_inovasi": "SiCantik",
            "admin_opd": null,
            "urusan_utama": "Kesehatan",
        }))
        .unwrap();
        assert_eq!(row.id, 12);
        assert_eq!(row.title, "SiCantik");
        assert!(row.owning_unit.is_none());
        assert_eq!(row.domain.as_deref(), Some("Kesehatan"));
        assert!(row.stage.is_none());
    }

    #[test]
    fn recommendation_display_values() {
        let rec: CollaborationRecommendation = serde_json::from_value(json!({
            "cluster_id": "3",
            "skor_kolaborasi": "0.954",
            "jumlah_inovasi": 2,
            "inovasi_1": {"id": 1, "judul": "A"},
            "inovasi_2": {"id": 2, "judul": "B"},
        }))
        .unwrap();
        assert_eq!(rec.percentage(), 95);
        assert_eq!(rec.label(), "Sangat Cocok");
        assert_eq!(rec.innovation_a.domain, "");
    }

    #[test]
    fn simulate_scalar_fields_become_lists() {
        let resp: SimulateResponse = serde_json::from_value(json!({
            "inovasi_1": {"id": 1, "judul": "A", "opd": "Dinkes"},
            "inovasi_2": {"id": 2, "judul": "B", "opd": "Diskominfo"},
            "skor_kecocokan": 82,
            "hasil_ai": {
                "judul_kolaborasi": "Integrasi",
                "manfaat_kolaborasi": "Efisiensi",
                "potensi_dampak": ["Cepat", "Murah"],
                "alasan_sinergi": "Saling melengkapi",
                "tingkat_kolaborasi": "Kolaborasi Strategis"
            }
        }))
        .unwrap();
        let result = ExplorationResult::from(resp);
        assert_eq!(result.score_percent, 82);
        assert_eq!(result.side_a.title, "A");
        assert_eq!(result.benefits, vec!["Efisiensi"]);
        assert_eq!(result.impacts.len(), 2);
        assert_eq!(result.side_b.owning_unit, "Diskominfo");
        assert_eq!(result.tier(), ScoreTier::Promising);
    }

    #[test]
    fn simulate_payload_without_sides_takes_them_from_the_catalogue() {
        let resp: SimulateResponse = serde_json::from_value(json!({
            "skor_kecocokan": 88,
            "hasil_ai": {
                "judul_kolaborasi": "Integrasi",
                "manfaat_kolaborasi": ["Efisiensi"],
                "potensi_dampak": "Cepat",
                "alasan_sinergi": "Saling melengkapi",
                "tingkat_kolaborasi": "Replikasi"
            }
        }))
        .unwrap();
        let mut result = ExplorationResult::from(resp);
        result.side_a.id = 1;
        result.side_b.id = 2;
        let catalogue: Vec<Innovation> = serde_json::from_value(json!([
            {"id": 1, "judul_inovasi": "E-Health", "admin_opd": "Dinkes"},
            {"id": 2, "judul_inovasi": "SIAK"}
        ]))
        .unwrap();
        result.complete_sides(&catalogue);

        assert_eq!(result.score_percent, 88);
        assert_eq!(result.side_a.title, "E-Health");
        assert_eq!(result.side_a.owning_unit, "Dinkes");
        assert_eq!(result.side_b.title, "SIAK");
        assert_eq!(result.side_b.owning_unit, UNKNOWN_UNIT);
    }

    #[test]
    fn detail_merge_falls_back_to_unknown_unit() {
        let rec: CollaborationRecommendation = serde_json::from_value(json!({
            "cluster_id": 1,
            "skor_kolaborasi": 0.8,
            "inovasi_1": {"id": 10, "judul": "A"},
            "inovasi_2": {"id": 11, "judul": "B"},
        }))
        .unwrap();
        let catalogue = vec![Innovation {
            id: 10,
            title: "A".into(),
            owning_unit: Some("Dinas Kesehatan".into()),
            domain: None,
            stage: None,
            maturity_label: None,
        }];
        let record = CollaborationDetailRecord::merge(&rec, &catalogue);
        assert_eq!(record.side_a.owning_unit, "Dinas Kesehatan");
        assert_eq!(record.side_b.owning_unit, UNKNOWN_UNIT);

        let orphan = CollaborationDetailRecord::merge(&rec, &[]);
        assert_eq!(orphan.side_a.owning_unit, UNKNOWN_UNIT);
    }

    #[test]
    fn monthly_trend_is_zero_filled() {
        let rows: Vec<TrendRow> = serde_json::from_value(json!([
            {"bulan": 3, "digital": 4, "nondigital": 1, "teknologi": 2},
            {"bulan": "11", "digital": "2", "nondigital": 0, "teknologi": 0},
            {"bulan": 14, "digital": 9},
        ]))
        .unwrap();
        let points = normalize_trend(rows, true);
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].label, "Jan");
        assert_eq!(points[0].total(), 0);
        assert_eq!(points[2].digital, 4);
        assert_eq!(points[10].label, "Nov");
        assert_eq!(points[10].digital, 2);
        assert_eq!(points.iter().map(|p| p.digital).sum::<u64>(), 6);
    }

    #[test]
    fn yearly_trend_keeps_order() {
        let rows: Vec<TrendRow> = serde_json::from_value(json!([
            {"tahun": 2023, "digital": 1, "nondigital": 2, "teknologi": 0},
            {"tahun": "2024", "digital": 5, "nondigital": 3, "teknologi": 1},
        ]))
        .unwrap();
        let points = normalize_trend(rows, false);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "2023");
        assert_eq!(points[1].total(), 8);
    }

    #[test]
    fn insight_kinds() {
        assert_eq!(InsightKind::parse("SUCCESS"), InsightKind::Success);
        assert_eq!(InsightKind::parse("warning"), InsightKind::Warning);
        assert_eq!(InsightKind::parse("trend"), InsightKind::Info);
        assert_eq!(AiInsight::unavailable().kind, InsightKind::Warning);
    }

    #[test]
    fn filter_summary_defaults_to_all() {
        let filters = AnalyticsFilters {
            year: Some(2024),
            ..AnalyticsFilters::default()
        };
        let summary = filters.summary();
        assert_eq!(summary[0], ("Tahun", "2024".to_string()));
        assert_eq!(summary[1].1, "Semua");
        assert!(!filters.is_unfiltered());
        assert!(AnalyticsFilters::default().is_unfiltered());
    }
}
