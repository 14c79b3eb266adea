//! In-process Alpaca server for tests.

mod logging_env;

use crate::client::ClientConfig;
use axum::Router;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) body: String,
    pub(crate) accept: Option<String>,
    pub(crate) content_type: Option<String>,
}

impl RecordedRequest {
    /// Look up a parameter in the query string or the form body.
    pub(crate) fn param(&self, name: &str) -> Option<String> {
        self.query
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.body.as_str()))
            .flat_map(|encoded| form_urlencoded::parse(encoded.as_bytes()))
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug, Clone)]
enum MockBody {
    /// Alpaca envelope; transaction IDs are filled in by the server.
    Envelope {
        value: Option<serde_json::Value>,
        error_number: i32,
        error_message: String,
    },
    /// Raw body sent as-is.
    Raw {
        content_type: &'static str,
        body: String,
    },
}

/// Scripted reply of the mock server.
#[derive(Debug, Clone)]
pub(crate) struct MockReply {
    status: StatusCode,
    body: MockBody,
    delay: Duration,
}

impl Default for MockReply {
    fn default() -> Self {
        Self::ack()
    }
}

impl MockReply {
    /// Successful envelope without a `Value`.
    pub(crate) const fn ack() -> Self {
        Self {
            status: StatusCode::OK,
            body: MockBody::Envelope {
                value: None,
                error_number: 0,
                error_message: String::new(),
            },
            delay: Duration::ZERO,
        }
    }

    /// Successful envelope with the given `Value`.
    pub(crate) fn value(value: impl Serialize) -> Self {
        Self {
            body: MockBody::Envelope {
                value: Some(serde_json::to_value(value).expect("mock value must serialize")),
                error_number: 0,
                error_message: String::new(),
            },
            ..Self::ack()
        }
    }

    /// Envelope with a device error.
    pub(crate) fn device_error(self, error_number: i32, error_message: &str) -> Self {
        let value = match self.body {
            MockBody::Envelope { value, .. } => value,
            MockBody::Raw { .. } => None,
        };
        Self {
            body: MockBody::Envelope {
                value,
                error_number,
                error_message: error_message.to_owned(),
            },
            ..self
        }
    }

    /// Raw body with the given content type.
    pub(crate) fn raw(content_type: &'static str, body: &str) -> Self {
        Self {
            body: MockBody::Raw {
                content_type,
                body: body.to_owned(),
            },
            ..Self::ack()
        }
    }

    /// Plain-text body, the way Alpaca servers report HTTP-level errors.
    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self::raw("text/plain; charset=utf-8", body).status(status)
    }

    pub(crate) fn status(self, status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("invalid status code"),
            ..self
        }
    }

    pub(crate) fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

#[derive(Debug, Default)]
struct Shared {
    requests: Vec<RecordedRequest>,
    reply: MockReply,
    server_transaction_id: u32,
}

type SharedState = Arc<Mutex<Shared>>;

/// Alpaca server double listening on a random local port.
#[derive(Debug)]
pub(crate) struct MockServer {
    addr: SocketAddr,
    shared: SharedState,
    task: JoinHandle<()>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockServer {
    pub(crate) async fn start() -> eyre::Result<Self> {
        let shared = SharedState::default();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = Router::new().fallback(handle).with_state(Arc::clone(&shared));

        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(%err, "Mock server failed");
            }
        });

        tracing::debug!(%addr, "Started mock Alpaca server");

        Ok(Self { addr, shared, task })
    }

    /// Config pointing at this server with client ID 42.
    pub(crate) fn config(&self) -> ClientConfig {
        ClientConfig::new(42, false, "", "127.0.0.1", i32::from(self.addr.port()))
    }

    pub(crate) fn reply_with(&self, reply: MockReply) {
        self.shared.lock().expect("mock state poisoned").reply = reply;
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.lock().expect("mock state poisoned").requests.clone()
    }

    pub(crate) fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("mock server didn't receive any requests")
    }
}

async fn handle(
    axum::extract::State(shared): axum::extract::State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        body,
        accept: header_str(header::ACCEPT),
        content_type: header_str(header::CONTENT_TYPE),
    };

    let client_transaction_id = request
        .param("ClientTransactionID")
        .and_then(|id| id.parse::<u32>().ok())
        .unwrap_or_default();

    let (reply, server_transaction_id) = {
        let mut shared = shared.lock().expect("mock state poisoned");
        shared.requests.push(request);
        shared.server_transaction_id += 1;
        (shared.reply.clone(), shared.server_transaction_id)
    };

    tokio::time::sleep(reply.delay).await;

    let (content_type, body) = match reply.body {
        MockBody::Envelope {
            value,
            error_number,
            error_message,
        } => {
            let mut envelope = serde_json::json!({
                "ClientTransactionID": client_transaction_id,
                "ServerTransactionID": server_transaction_id,
                "ErrorNumber": error_number,
                "ErrorMessage": error_message,
            });
            if let Some(value) = value {
                envelope["Value"] = value;
            }
            ("application/json", envelope.to_string())
        }
        MockBody::Raw { content_type, body } => (content_type, body),
    };

    (reply.status, [(header::CONTENT_TYPE, content_type)], body).into_response()
}
