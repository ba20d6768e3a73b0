//! Ad-hoc exploration of two innovations through the simulate endpoint.

use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, ExplorationResult, HttpGet, Innovation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorationError {
    #[error("Pilih dua inovasi terlebih dahulu")]
    MissingSelection,
    #[error("Pilih dua inovasi yang berbeda")]
    SameInnovation,
    #[error("Gagal mengambil analisis kolaborasi AI")]
    Failed,
}

/// Both IDs must be set and distinct. Checked before any request goes out.
pub fn validate_pair(
    first: Option<u64>,
    second: Option<u64>,
) -> Result<(u64, u64), ExplorationError> {
    let (Some(first), Some(second)) = (first, second) else {
        return Err(ExplorationError::MissingSelection);
    };
    if first == second {
        return Err(ExplorationError::SameInnovation);
    }
    Ok((first, second))
}

/// `catalogue` supplies titles and owning units the simulate payload omits.
pub async fn run_exploration<T: HttpGet>(
    api: &ApiClient<T>,
    catalogue: &[Innovation],
    first: Option<u64>,
    second: Option<u64>,
) -> Result<ExplorationResult, ExplorationError> {
    let (first, second) = validate_pair(first, second)?;
    info!(first, second, "exploring collaboration");
    let mut result = api.simulate(first, second).await.map_err(|err| {
        warn!("exploration failed: {err}");
        ExplorationError::Failed
    })?;
    result.complete_sides(catalogue);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ScriptedTransport, core::config::ApiConfig};
    use futures::executor::block_on;

    #[test]
    fn unset_and_equal_selections_are_rejected() {
        assert_eq!(
            validate_pair(None, Some(2)),
            Err(ExplorationError::MissingSelection)
        );
        assert_eq!(
            validate_pair(Some(5), Some(5)),
            Err(ExplorationError::SameInnovation)
        );
        assert_eq!(validate_pair(Some(5), Some(6)), Ok((5, 6)));
    }

    #[test]
    fn validation_failures_issue_no_request() {
        let transport = ScriptedTransport::new();
        let api = ApiClient::with_transport(ApiConfig::default(), transport.clone());
        let err = block_on(run_exploration(&api, &[], Some(5), Some(5))).unwrap_err();
        assert_eq!(err.to_string(), "Pilih dua inovasi yang berbeda");
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn backend_failures_map_to_a_single_message() {
        let transport = ScriptedTransport::new().respond("/ai-input-collaboration/simulate", 500, "");
        let api = ApiClient::with_transport(ApiConfig::default(), transport.clone());
        let err = block_on(run_exploration(&api, &[], Some(1), Some(2))).unwrap_err();
        assert_eq!(err, ExplorationError::Failed);
        assert_eq!(transport.count_matching("inovasi_1_id=1&inovasi_2_id=2"), 1);
    }

    #[test]
    fn score_and_ai_only_payload_is_completed_from_the_catalogue() {
        let transport = ScriptedTransport::new().respond(
            "/ai-input-collaboration/simulate",
            200,
            r#"{"skor_kecocokan":88,"hasil_ai":{"judul_kolaborasi":"Integrasi Layanan","manfaat_kolaborasi":["Efisiensi"],"potensi_dampak":"Layanan lebih cepat","alasan_sinergi":"Saling melengkapi","tingkat_kolaborasi":"Replikasi"}}"#,
        );
        let api = ApiClient::with_transport(ApiConfig::default(), transport);
        let catalogue: Vec<Innovation> = serde_json::from_str(
            r#"[{"id":1,"judul_inovasi":"E-Health","admin_opd":"Dinkes"},{"id":2,"judul_inovasi":"SIAK","admin_opd":"Dispendukcapil"}]"#,
        )
        .unwrap();

        let result = block_on(run_exploration(&api, &catalogue, Some(2), Some(1))).unwrap();
        assert_eq!(result.score_percent, 88);
        assert_eq!(result.title, "Integrasi Layanan");
        assert_eq!((result.side_a.id, result.side_a.title.as_str()), (2, "SIAK"));
        assert_eq!(result.side_a.owning_unit, "Dispendukcapil");
        assert_eq!((result.side_b.id, result.side_b.title.as_str()), (1, "E-Health"));
        assert_eq!(result.side_b.owning_unit, "Dinkes");
    }
}
