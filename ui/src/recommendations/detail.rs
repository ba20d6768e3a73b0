use tracing::warn;

use crate::api::{ApiClient, CollaborationDetailRecord, CollaborationRecommendation, HttpGet};

/// Build the detail record for a recommendation, recovering owning units from
/// `/dashboard/inovasi-list`. The secondary fetch never fails the transition:
/// units fall back to `"N/A"`.
pub async fn open_detail<T: HttpGet>(
    api: &ApiClient<T>,
    rec: &CollaborationRecommendation,
) -> CollaborationDetailRecord {
    let catalogue = api.innovations().await.unwrap_or_else(|err| {
        warn!("owning units unavailable: {err}");
        Vec::new()
    });
    CollaborationDetailRecord::merge(rec, &catalogue)
}
