//! EU VIES REST API client for VAT number validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::registry::{VatRegistry, ViesError, ViesFault};

/// Public VIES endpoint.
pub const VIES_URL: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// Client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViesConfig {
    /// Endpoint receiving the `check-vat-number` POST.
    pub url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ViesConfig {
    fn default() -> Self {
        Self {
            url: VIES_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Result of a VIES VAT number check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViesResult {
    /// Whether the VAT number is currently valid.
    pub valid: bool,
    /// Date of the request (YYYY-MM-DD).
    pub request_date: Option<String>,
    /// Registered company name (if available).
    pub name: Option<String>,
    /// Registered address (if available).
    pub address: Option<String>,
}

/// VIES API response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesApiResponse {
    valid: Option<bool>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
    // Error fields
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

/// VIES API request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest {
    country_code: String,
    vat_number: String,
}

/// VIES client. One connection pool is shared by all checks.
#[derive(Debug, Clone)]
pub struct ViesClient {
    client: reqwest::Client,
    url: String,
}

impl ViesClient {
    /// Build a client for the given settings.
    ///
    /// # Errors
    ///
    /// Returns `ViesError::Network` if the HTTP client cannot be built.
    pub fn new(config: ViesConfig) -> Result<Self, ViesError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ViesError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: config.url,
        })
    }

    /// Check a VAT number against the EU VIES API.
    ///
    /// `country_code` is the 2-letter VIES code (e.g. "DE", "EL").
    /// `vat_number` is the number part without the country prefix.
    ///
    /// # Errors
    ///
    /// Returns `ViesError::Network` on connection issues,
    /// `ViesError::Fault` when VIES reports a fault code,
    /// `ViesError::ApiError` on other HTTP errors,
    /// `ViesError::ParseError` on unexpected response formats.
    pub async fn check(&self, country_code: &str, vat_number: &str) -> Result<ViesResult, ViesError> {
        let req = ViesRequest {
            country_code: country_code.to_uppercase(),
            vat_number: vat_number.to_string(),
        };

        let resp = self
            .client
            .post(&self.url)
            .json(&req)
            .send()
            .await
            .map_err(|e| ViesError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ViesError::Network(e.to_string()))?;

        debug!(%status, country = %req.country_code, "VIES response");
        parse_response(status.is_success(), status.as_u16(), &body)
    }
}

/// Turn a VIES HTTP response into a result. Fault codes are honoured even
/// on non-2xx responses.
fn parse_response(success: bool, status: u16, body: &str) -> Result<ViesResult, ViesError> {
    let api_resp: ViesApiResponse = match serde_json::from_str(body) {
        Ok(resp) => resp,
        Err(_) if !success => return Err(ViesError::ApiError(format!("HTTP {status}: {body}"))),
        Err(e) => return Err(ViesError::ParseError(e.to_string())),
    };

    if let Some(err) = api_resp.error_wrappers.as_ref().and_then(|e| e.first()) {
        return Err(match (&err.error, &err.message) {
            (Some(code), _) => ViesError::Fault(ViesFault::from_code(code)),
            (None, Some(message)) => ViesError::ApiError(message.clone()),
            (None, None) => ViesError::ApiError("unknown error".into()),
        });
    }
    if !success {
        return Err(ViesError::ApiError(format!("HTTP {status}: {body}")));
    }

    Ok(ViesResult {
        valid: api_resp.valid.unwrap_or(false),
        request_date: api_resp.request_date,
        name: api_resp.name.filter(|n| n != "---" && !n.is_empty()),
        address: api_resp.address.filter(|a| a != "---" && !a.is_empty()),
    })
}

impl VatRegistry for ViesClient {
    async fn check_vat(&self, vat_code: &str) -> Result<bool, ViesError> {
        if vat_code.len() < 3 || !vat_code.is_char_boundary(2) {
            return Err(ViesError::Fault(ViesFault::InvalidInput));
        }
        let (country, number) = vat_code.split_at(2);
        Ok(self.check(country, number).await?.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vies_url_is_https() {
        assert!(VIES_URL.starts_with("https://"));
        assert_eq!(ViesConfig::default().url, VIES_URL);
    }

    #[test]
    fn vies_request_serialization() {
        let req = ViesRequest {
            country_code: "BE".into(),
            vat_number: "0123456789".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"countryCode\":\"BE\""));
        assert!(json.contains("\"vatNumber\":\"0123456789\""));
    }

    #[test]
    fn valid_response() {
        let json = r#"{"valid":true,"requestDate":"2024-01-15","name":"ACME SA","address":"RUE 1\n1000 BRUXELLES"}"#;
        let result = parse_response(true, 200, json).unwrap();
        assert!(result.valid);
        assert_eq!(result.name.as_deref(), Some("ACME SA"));
    }

    #[test]
    fn dashes_are_filtered() {
        let json = r#"{"valid":false,"name":"---","address":"---"}"#;
        let result = parse_response(true, 200, json).unwrap();
        assert!(!result.valid);
        assert!(result.name.is_none());
        assert!(result.address.is_none());
    }

    #[test]
    fn fault_code_on_error_status() {
        let json = r#"{"actionSucceed":false,"errorWrappers":[{"error":"MS_UNAVAILABLE"}]}"#;
        let err = parse_response(false, 500, json).unwrap_err();
        assert!(matches!(err, ViesError::Fault(ViesFault::MemberStateUnavailable)));
    }

    #[test]
    fn fault_code_on_success_status() {
        let json = r#"{"errorWrappers":[{"error":"INVALID_INPUT","message":"bad"}]}"#;
        let err = parse_response(true, 200, json).unwrap_err();
        assert!(matches!(err, ViesError::Fault(ViesFault::InvalidInput)));
    }

    #[test]
    fn non_json_error_body() {
        let err = parse_response(false, 503, "<html>down</html>").unwrap_err();
        assert!(matches!(err, ViesError::ApiError(msg) if msg.starts_with("HTTP 503")));
    }

    #[test]
    fn non_json_success_body() {
        let err = parse_response(true, 200, "nope").unwrap_err();
        assert!(matches!(err, ViesError::ParseError(_)));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ViesConfig = serde_json::from_str(r#"{"timeout_secs":5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.url, VIES_URL);
    }
}
