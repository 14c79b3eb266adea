//! Generic Alpaca request/response client.

use crate::api::{ConfiguredDevice, DeviceType, ServerInfo};
use crate::discovery::DEFAULT_ALPACA_PORT;
use crate::endpoint;
use crate::errors::{AlpacaError, AlpacaResult};
use crate::params::Form;
use crate::response::{AckEnvelope, Envelope, ImageArray, ImageArrayEnvelope, Reply};
use crate::transaction::{HttpStatusError, TransactionState};
use mime::Mime;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// How protocol-level and HTTP-level failures are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Every failure is returned as an error.
    ///
    /// Non-2xx replies become [`AlpacaError::Http`] and a non-zero `ErrorNumber`
    /// becomes [`AlpacaError::Device`] for GET and PUT alike.
    #[default]
    Strict,
    /// Reproduces the historical behaviour of Alpaca client libraries.
    ///
    /// Non-2xx replies are only recorded in the client error state and the body
    /// is decoded anyway. A non-zero `ErrorNumber` is returned as an error for PUT
    /// requests only; GET requests return the decoded `Value` regardless, so
    /// callers have to inspect [`AlpacaClient::last_error_number`] themselves.
    Legacy,
}

/// Connection settings of an [`AlpacaClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client ID sent with every request.
    ///
    /// Defaults to a random value.
    pub client_id: u32,
    /// Use `https` instead of `http`.
    pub secure: bool,
    /// Host name. Only used when `port` is `-1`.
    pub domain: String,
    /// IP address (or host name) used together with `port`.
    ///
    /// Defaults to `127.0.0.1`.
    pub ip: String,
    /// Server port, or `-1` to address the server by `domain` alone.
    ///
    /// Defaults to 11111.
    pub port: i32,
    /// Deadline for each request, including reading the response body.
    ///
    /// Defaults to 30 seconds. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Error reporting policy.
    pub error_policy: ErrorPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: rand::random(),
            secure: false,
            domain: String::new(),
            ip: "127.0.0.1".to_owned(),
            port: i32::from(DEFAULT_ALPACA_PORT),
            timeout: Some(Duration::from_secs(30)),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given client ID and server location.
    pub fn new(
        client_id: u32,
        secure: bool,
        domain: impl Into<String>,
        ip: impl Into<String>,
        port: i32,
    ) -> Self {
        Self {
            client_id,
            secure,
            domain: domain.into(),
            ip: ip.into(),
            port,
            timeout: Some(Duration::from_secs(30)),
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Base URL resolved from `secure`, `domain`, `ip` and `port`.
    pub fn base_url(&self) -> String {
        endpoint::base_url(self.secure, &self.domain, &self.ip, self.port)
    }
}

/// Client for a single Alpaca server.
///
/// Owns the client ID, the transaction counter and the last observed HTTP error.
/// The base URL is resolved once at construction.
///
/// Clones (and handles returned by [`with_timeout`](Self::with_timeout)) share the
/// same counter and error state. Each PUT gets a distinct transaction ID even
/// when issued concurrently, but concurrent requests can reach the server in any
/// order, so control a device from a single task if the server relies on the
/// ordering of transaction IDs.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    http: reqwest::Client,
    base_url: String,
    client_id: u32,
    timeout: Option<Duration>,
    error_policy: ErrorPolicy,
    state: Arc<TransactionState>,
}

struct RawResponse {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    body: Vec<u8>,
}

macro_rules! typed_getters {
    ($($(#[doc = $doc:literal])* $name:ident -> $ty:ty;)*) => {
        $(
            $(#[doc = $doc])*
            pub async fn $name(
                &self,
                device_type: DeviceType,
                device_number: u32,
                method: &str,
            ) -> AlpacaResult<$ty> {
                self.get_value(device_type, device_number, method).await
            }
        )*
    };
}

impl AlpacaClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client on top of an existing `reqwest` client.
    ///
    /// Useful for enabling TLS options, proxies or sharing a connection pool.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url(),
            client_id: config.client_id,
            timeout: config.timeout,
            error_policy: config.error_policy,
            state: Arc::default(),
        }
    }

    /// Return a handle that uses a different deadline for its requests.
    ///
    /// The handle shares the transaction counter and error state with `self`.
    #[must_use]
    pub fn with_timeout(&self, timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    /// Resolved base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client ID sent with every request.
    pub const fn client_id(&self) -> u32 {
        self.client_id
    }

    /// Current deadline.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Error reporting policy.
    pub const fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Current transaction ID.
    pub fn transaction_id(&self) -> u32 {
        self.state.current_transaction_id()
    }

    /// Query string for the current transaction: `ClientID={id}&ClientTransactionID={tx}`.
    pub fn query_string(&self) -> String {
        endpoint::query_string(self.client_id, self.transaction_id())
    }

    /// Full URL of a device method.
    pub fn endpoint(&self, device_type: impl Display, device_number: u32, method: &str) -> String {
        endpoint::endpoint(&self.base_url, device_type, device_number, method)
    }

    /// Most recent HTTP error status observed by this client, if any.
    ///
    /// This is never cleared by successful calls.
    pub fn last_error(&self) -> Option<HttpStatusError> {
        self.state.last_error()
    }

    /// HTTP status of the most recent HTTP error, or `0` if none was observed yet.
    pub fn last_error_number(&self) -> i32 {
        self.last_error().map_or(0, |err| err.number)
    }

    /// Body of the most recent HTTP error reply, or an empty string.
    pub fn last_error_message(&self) -> String {
        self.last_error().map(|err| err.message).unwrap_or_default()
    }

    typed_getters! {
        /// GET a string property.
        get_string -> String;
        /// GET a string-list property.
        get_string_list -> Vec<String>;
        /// GET a boolean property.
        get_bool -> bool;
        /// GET a floating-point property.
        get_f64 -> f64;
        /// GET an integer property.
        get_i32 -> i32;
        /// GET an unsigned integer list property.
        get_u32_list -> Vec<u32>;
    }

    /// GET a 2-D image array.
    pub async fn get_image_array(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
    ) -> AlpacaResult<ImageArray> {
        self.get_reply::<ImageArrayEnvelope>(device_type, device_number, method, Form::new())
            .await
    }

    /// GET a property of any JSON-decodable type.
    pub async fn get_value<T: DeserializeOwned + Default>(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
    ) -> AlpacaResult<T> {
        self.get_value_with(device_type, device_number, method, Form::new())
            .await
    }

    /// GET a property, appending `extra` parameters after the transaction ones.
    pub async fn get_value_with<T: DeserializeOwned + Default>(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
        extra: Form,
    ) -> AlpacaResult<T> {
        self.get_reply::<Envelope<T>>(device_type, device_number, method, extra)
            .await
    }

    /// GET a device method and decode the reply as `R`.
    ///
    /// Uses the current transaction ID without advancing it.
    pub async fn get_reply<R: Reply>(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
        extra: Form,
    ) -> AlpacaResult<R::Value> {
        let url = self.endpoint(device_type, device_number, method);
        let client_transaction_id = self.transaction_id();
        self.exchange::<R>(Method::GET, url, extra, client_transaction_id)
            .await
    }

    /// PUT a device method.
    ///
    /// Advances the transaction ID by one before sending, whatever the outcome of
    /// the request, and adds `ClientID` and `ClientTransactionID` in front of `form`.
    pub async fn put(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
        form: Form,
    ) -> AlpacaResult {
        self.put_reply::<AckEnvelope>(device_type, device_number, method, form)
            .await
            .map(drop)
    }

    /// PUT a device method that returns a value (e.g. `action` or `commandstring`).
    pub async fn put_value<T: DeserializeOwned + Default>(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
        form: Form,
    ) -> AlpacaResult<T> {
        self.put_reply::<Envelope<T>>(device_type, device_number, method, form)
            .await
    }

    async fn put_reply<R: Reply>(
        &self,
        device_type: DeviceType,
        device_number: u32,
        method: &str,
        form: Form,
    ) -> AlpacaResult<R::Value> {
        let url = self.endpoint(device_type, device_number, method);
        let client_transaction_id = self.state.next_transaction_id();
        self.exchange::<R>(Method::PUT, url, form, client_transaction_id)
            .await
    }

    /// Supported Alpaca API versions.
    pub async fn api_versions(&self) -> AlpacaResult<Vec<u32>> {
        self.get_management::<Vec<u32>>("apiversions").await
    }

    /// General information about the server.
    pub async fn server_info(&self) -> AlpacaResult<ServerInfo> {
        self.get_management::<ServerInfo>("v1/description").await
    }

    /// Devices exposed by the server.
    pub async fn configured_devices(&self) -> AlpacaResult<Vec<ConfiguredDevice>> {
        self.get_management::<Vec<ConfiguredDevice>>("v1/configureddevices")
            .await
    }

    async fn get_management<T: DeserializeOwned + Default>(&self, path: &str) -> AlpacaResult<T> {
        let url = endpoint::management_endpoint(&self.base_url, path);
        let client_transaction_id = self.transaction_id();
        self.exchange::<Envelope<T>>(Method::GET, url, Form::new(), client_transaction_id)
            .await
    }

    async fn exchange<R: Reply>(
        &self,
        method: Method,
        url: String,
        params: Form,
        client_transaction_id: u32,
    ) -> AlpacaResult<R::Value> {
        let is_put = method == Method::PUT;
        let params = params.with_transaction(self.client_id, client_transaction_id);

        let span = tracing::debug_span!(
            "Alpaca transaction",
            %method,
            endpoint = %url,
            client_id = self.client_id,
            client_transaction_id,
        );

        async move {
            let request = self
                .http
                .request(method, &url)
                .header(ACCEPT, mime::APPLICATION_JSON.as_ref());

            let request = if is_put {
                request.form(&params)
            } else {
                request.query(&params)
            };

            let RawResponse {
                status,
                content_type,
                body,
            } = self.send(request, &url).await?;

            if !status.is_success() {
                let message = String::from_utf8_lossy(&body).into_owned();
                tracing::warn!(status = status.as_u16(), %message, "Alpaca server returned HTTP error");
                self.state
                    .record_error(i32::from(status.as_u16()), message.clone());

                if self.error_policy == ErrorPolicy::Strict {
                    return Err(AlpacaError::Http {
                        endpoint: url,
                        status: status.as_u16(),
                        message,
                    });
                }
            }

            check_content_type(content_type.as_ref());

            let reply = serde_json::from_slice::<R>(&body).map_err(|source| {
                tracing::error!(%source, "Couldn't decode Alpaca response");
                AlpacaError::Decode {
                    endpoint: url.clone(),
                    source,
                }
            })?;

            let response_transaction = reply.transaction();

            tracing::debug!(
                server_transaction_id = response_transaction.server_transaction_id,
                "Received response",
            );

            // Some servers don't echo the ID at all, which decodes as 0.
            let received = response_transaction.client_transaction_id;
            if received != 0 && received != client_transaction_id {
                tracing::warn!(
                    sent = client_transaction_id,
                    received,
                    "ClientTransactionID mismatch",
                );
            }

            if let Some(err) = reply.device_error() {
                if self.error_policy == ErrorPolicy::Legacy && !is_put {
                    tracing::debug!(%err, "Device reported an error, returning value anyway");
                } else {
                    tracing::warn!(%err, "Device reported an error");
                    return Err(AlpacaError::Device(err));
                }
            }

            Ok(reply.into_value())
        }
        .instrument(span)
        .await
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> AlpacaResult<RawResponse> {
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let content_type = response.headers().get(CONTENT_TYPE).cloned();
            let body = response.bytes().await?.to_vec();
            Ok::<_, reqwest::Error>(RawResponse {
                status,
                content_type,
                body,
            })
        };

        let result = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, exchange).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    tracing::error!(?timeout, "Alpaca request timed out");
                    return Err(AlpacaError::Timeout {
                        endpoint: url.to_owned(),
                        timeout,
                    });
                }
            },
            None => exchange.await,
        };

        result.map_err(|source| {
            tracing::error!(%source, "Alpaca request failed");
            AlpacaError::Transport {
                endpoint: url.to_owned(),
                source,
            }
        })
    }
}

fn check_content_type(content_type: Option<&HeaderValue>) {
    let Some(content_type) = content_type else {
        return;
    };
    match content_type
        .to_str()
        .ok()
        .and_then(|value| value.parse::<Mime>().ok())
    {
        Some(mime_type) if mime_type.essence_str() == mime::APPLICATION_JSON.essence_str() => {}
        _ => tracing::warn!(?content_type, "Expected JSON response"),
    }
}
