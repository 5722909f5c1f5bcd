//! `POST /test`: run an integration check or a diagnostic sweep for one shop.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shopcheck_probe::{DiagnosticReport, IntegrationResult, Prober};

use super::AppState;
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    shop_url: Option<String>,
    access_token: Option<String>,
    api_version: Option<String>,
    #[serde(default)]
    diagnostic_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Standard,
    Diagnostic,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    success: bool,
    mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<IntegrationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic_results: Option<DiagnosticReport>,
}

/// Failure body: `{success: false, message, error_details?}`.
#[derive(Debug)]
pub struct CheckError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl CheckError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    /// `details` is only kept when `expose` is set.
    fn internal(message: impl Into<String>, details: impl ToString, expose: bool) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: expose.then(|| details.to_string()),
        }
    }
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "message": self.message,
        });
        if let Some(details) = self.details {
            body["error_details"] = json!(details);
        }
        (self.status, Json(body)).into_response()
    }
}

/// Keeps a credential byte for byte; only a blank value counts as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub(super) async fn run_check(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, CheckError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %req_id.0, error = %rejection, "rejected check request body");
        CheckError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let shop_url = required(request.shop_url);
    let access_token = present(request.access_token);
    let (Some(shop_url), Some(access_token)) = (shop_url.clone(), access_token.clone()) else {
        let missing: Vec<&str> = [("shop_url", shop_url), ("access_token", access_token)]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name)
            .collect();
        return Err(CheckError::bad_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    };

    let api_version = match required(request.api_version) {
        Some(v) if shopcheck_core::is_valid_api_version(&v) => v,
        Some(v) => {
            return Err(CheckError::bad_request(format!(
                "Invalid api_version \"{v}\": expected YYYY-MM or \"unstable\""
            )))
        }
        None => state.config.api_version.clone(),
    };

    let expose = state.config.is_development();
    let prober = Prober::from_config(&state.config, &access_token)
        .map_err(|e| CheckError::internal("Failed to build Shopify HTTP client", e, expose))?
        .with_scheme(state.scheme);

    let mode = if request.diagnostic_mode {
        Mode::Diagnostic
    } else {
        Mode::Standard
    };
    tracing::info!(request_id = %req_id.0, shop = %shop_url, api_version = %api_version, ?mode, "running check");

    // A panic inside the check surfaces as a JoinError instead of tearing
    // down the connection.
    let response = match mode {
        Mode::Diagnostic => {
            let report = tokio::spawn(async move {
                prober.run_diagnostics(&shop_url, &api_version).await
            })
            .await
            .map_err(|e| internal_failure(&req_id, e, expose))?;
            CheckResponse {
                success: true,
                mode,
                results: None,
                diagnostic_results: Some(report),
            }
        }
        Mode::Standard => {
            let result = tokio::spawn(async move {
                prober.check_integration(&shop_url, &api_version).await
            })
            .await
            .map_err(|e| internal_failure(&req_id, e, expose))?;
            CheckResponse {
                success: true,
                mode,
                results: Some(result),
                diagnostic_results: None,
            }
        }
    };

    Ok(Json(response))
}

fn internal_failure(req_id: &RequestId, error: tokio::task::JoinError, expose: bool) -> CheckError {
    tracing::error!(request_id = %req_id.0, error = %error, "check task failed");
    CheckError::internal("Internal error while running the check", error, expose)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn error_body(err: CheckError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    #[tokio::test]
    async fn internal_error_exposes_details_only_when_asked() {
        let (status, body) = error_body(CheckError::internal("boom", "stack", true)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error_details"], "stack");

        let (_, body) = error_body(CheckError::internal("boom", "stack", false)).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "boom");
        assert!(body.get("error_details").is_none());
    }

    #[test]
    fn required_trims_and_drops_blank_values() {
        assert_eq!(required(Some(" acme ".to_owned())), Some("acme".to_owned()));
        assert_eq!(required(Some("   ".to_owned())), None);
        assert_eq!(required(None), None);
    }

    #[test]
    fn access_token_is_kept_verbatim() {
        assert_eq!(
            present(Some(" shpat_abc ".to_owned())),
            Some(" shpat_abc ".to_owned())
        );
        assert_eq!(present(Some(" \t".to_owned())), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn diagnostic_response_omits_standard_results() {
        let response = CheckResponse {
            success: true,
            mode: Mode::Diagnostic,
            results: None,
            diagnostic_results: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["mode"], "diagnostic");
        assert!(json.get("results").is_none());
    }
}
