//! License HTTP Routes
//!
//! Read and replace the active license. Replacing builds a fresh
//! orchestrator and swaps it in whole.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, ServiceEvent};
use crate::reasoning::{ExplanationStyle, LicenseConfig, ReasoningOrchestrator};

use super::auth::authorize;
use super::errors::{ApiError, ApiResult};
use super::state::ServiceState;

/// License routes with shared state
pub fn license_routes(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/license", get(get_license_handler).post(configure_license_handler))
        .with_state(state)
}

/// Public view of the active license. The key is never echoed.
#[derive(Debug, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub brand_name: String,
    pub explanation_style: ExplanationStyle,
    pub enabled_features: Vec<String>,
    pub daily_request_limit: Option<u64>,
    pub rate_limit_per_minute: Option<u64>,
}

impl From<&LicenseConfig> for LicenseInfo {
    fn from(license: &LicenseConfig) -> Self {
        Self {
            brand_name: license.brand_name.clone(),
            explanation_style: license.explanation_style.clone(),
            enabled_features: license.enabled_features.clone(),
            daily_request_limit: license.daily_request_limit,
            rate_limit_per_minute: license.rate_limit_per_minute,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LicenseUpdateResponse {
    pub status: String,
    pub message: String,
    pub features_enabled: Vec<String>,
}

/// Current license information
async fn get_license_handler(
    State(state): State<Arc<ServiceState>>,
    headers: HeaderMap,
) -> ApiResult<Json<LicenseInfo>> {
    let engine = authorize(&state, &headers)?;
    let license = engine.license().ok_or(ApiError::InvalidLicenseKey)?;
    Ok(Json(LicenseInfo::from(license)))
}

/// Install a new license. The caller must hold the current key.
async fn configure_license_handler(
    State(state): State<Arc<ServiceState>>,
    headers: HeaderMap,
    Json(license): Json<LicenseConfig>,
) -> ApiResult<Json<LicenseUpdateResponse>> {
    authorize(&state, &headers)?;

    if license.license_key.is_empty() {
        return Err(ApiError::LicenseRejected(
            "license_key must not be empty".to_string(),
        ));
    }

    let brand = license.brand_name.clone();
    let features = license.enabled_features.clone();
    state.replace_engine(ReasoningOrchestrator::new(license));
    log_event_with_fields(ServiceEvent::LicenseUpdated, &[("brand", brand.as_str())]);

    Ok(Json(LicenseUpdateResponse {
        status: "success".to_string(),
        message: format!("License configured for {}", brand),
        features_enabled: features,
    }))
}
