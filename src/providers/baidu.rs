/*!
 * Baidu Translate client.
 *
 * Requests are form-encoded POSTs signed with
 * `md5(appid + q + salt + secret_key)` in lowercase hex, with a fresh
 * random salt per request. The secret key and the computed sign never
 * appear in logs or `Debug` output.
 */

use async_trait::async_trait;
use log::{debug, error};
use md5::{Digest, Md5};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

use super::Provider;
use crate::errors::{AppError, ProviderError};
use crate::language_utils;
use crate::translation::TranslationRequest;

/// Public Baidu general translation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// App id and secret key pair
#[derive(Clone)]
pub struct BaiduCredentials {
    app_id: String,
    secret_key: String,
}

impl BaiduCredentials {
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, AppError> {
        let app_id = app_id.into();
        let secret_key = secret_key.into();

        if app_id.trim().is_empty() {
            return Err(AppError::Config("Baidu app id is empty".to_string()));
        }
        if secret_key.trim().is_empty() {
            return Err(AppError::Config("Baidu secret key is empty".to_string()));
        }

        Ok(Self { app_id, secret_key })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

impl fmt::Debug for BaiduCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaiduCredentials")
            .field("app_id", &self.app_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Form body of one translate call, fields in wire order
#[derive(Clone, Serialize)]
pub struct SignedForm {
    q: String,
    from: String,
    to: String,
    appid: String,
    salt: String,
    sign: String,
}

impl SignedForm {
    pub fn from_language(&self) -> &str {
        &self.from
    }

    pub fn to_language(&self) -> &str {
        &self.to
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn sign(&self) -> &str {
        &self.sign
    }
}

impl fmt::Debug for SignedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedForm")
            .field("q_chars", &self.q.chars().count())
            .field("from", &self.from)
            .field("to", &self.to)
            .field("appid", &self.appid)
            .field("salt", &self.salt)
            .field("sign", &"<redacted>")
            .finish()
    }
}

/// Baidu translate response
#[derive(Debug, Deserialize)]
pub struct BaiduResponse {
    /// Detected or requested source language
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub to: Option<String>,

    /// One entry per input line
    #[serde(default)]
    pub trans_result: Option<Vec<TransResult>>,

    /// Present only on failure; Baidu sends it as a string or a number
    #[serde(default, deserialize_with = "deserialize_error_code")]
    pub error_code: Option<String>,

    #[serde(default)]
    pub error_msg: Option<String>,
}

/// A single translated segment
#[derive(Debug, Deserialize)]
pub struct TransResult {
    #[serde(default)]
    pub src: String,
    pub dst: String,
}

fn deserialize_error_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(code)) => Some(code),
        Some(other) => Some(other.to_string()),
    })
}

/// Baidu client for the general text translation API
#[derive(Debug)]
pub struct Baidu {
    /// HTTP client for API requests
    client: Client,
    credentials: BaiduCredentials,
    endpoint: String,
    timeout_secs: u64,
}

impl Baidu {
    /// Create a new Baidu client
    pub fn new(credentials: BaiduCredentials, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            credentials,
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
            timeout_secs,
        }
    }

    /// `md5(app_id + text + salt + secret_key)` as lowercase hex
    pub fn sign(app_id: &str, text: &str, salt: &str, secret_key: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(app_id.as_bytes());
        hasher.update(text.as_bytes());
        hasher.update(salt.as_bytes());
        hasher.update(secret_key.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Fresh numeric salt
    pub fn generate_salt() -> String {
        rand::rng().random_range(10_000_000u32..100_000_000).to_string()
    }

    /// Build the signed form body for a request with the given salt
    pub fn signed_form(&self, request: &TranslationRequest, salt: &str) -> SignedForm {
        let text = request.text();
        SignedForm {
            q: text.to_string(),
            from: Self::wire_language(request.source_language()),
            to: Self::wire_language(request.target_language()),
            appid: self.credentials.app_id.clone(),
            salt: salt.to_string(),
            sign: Self::sign(&self.credentials.app_id, text, salt, &self.credentials.secret_key),
        }
    }

    fn wire_language(code: &str) -> String {
        language_utils::to_provider_code(code).unwrap_or_else(|_| code.to_string())
    }

    /// Send a translate request and decode the JSON body
    pub async fn complete(&self, request: &TranslationRequest) -> Result<BaiduResponse, ProviderError> {
        let form = self.signed_form(request, &Self::generate_salt());
        debug!(
            "Sending Baidu translation request ({} chars, {} -> {})",
            request.text().chars().count(),
            form.from,
            form.to
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            error!("Baidu API error ({}): {}", status, body);
            return Err(ProviderError::HttpError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Self::parse_response(&body)
    }

    /// Decode a response body, turning an `error_code` into an API error
    pub fn parse_response(body: &str) -> Result<BaiduResponse, ProviderError> {
        let response: BaiduResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid JSON from Baidu: {}", e)))?;

        if let Some(code) = &response.error_code {
            return Err(ProviderError::ApiError {
                code: code.clone(),
                message: response.error_msg.clone().unwrap_or_default(),
            });
        }

        Ok(response)
    }

    /// The first translated segment of a response
    pub fn extract_text(response: &BaiduResponse) -> Result<String, ProviderError> {
        response
            .trans_result
            .as_ref()
            .and_then(|results| results.first())
            .map(|result| result.dst.clone())
            .ok_or_else(|| ProviderError::ParseError("Response has no trans_result".to_string()))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Provider for Baidu {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let response = self.complete(request).await?;
        Self::extract_text(&response)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = TranslationRequest::new("hello", "en", "zh")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        self.translate(&request).await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "baidu"
    }
}
