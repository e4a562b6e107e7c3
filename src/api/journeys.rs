use crate::models::{JourneyRequest, JourneyResult, MapSettings};
use serde_json::Value;

const COMPUTE_JOURNEYS_PATH: &str = "computejourneys";

/// Ask the journey service for the best journey times of `request`
///
/// Suspends until the service answers. Destinations the service could not
/// reach are absent from the result.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not a success
/// - The response body is not a JSON array
pub async fn fetch_journey_times(settings: &MapSettings, request: &JourneyRequest) -> Result<JourneyResult, String> {
    let url = settings.endpoint(COMPUTE_JOURNEYS_PATH);
    crate::log!("Requesting journeys from {} to {} destinations", request.origin, request.destinations.len());

    let response = reqwest::Client::new()
        .post(&url)
        .json(&request.to_wire())
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Journey service returned {status}: {body}"));
    }

    let raw = response
        .json::<Vec<Value>>()
        .await
        .map_err(|e| format!("Failed to deserialize: {e}"))?;

    Ok(JourneyResult::from_response(raw, request))
}
