//! Transport seam between the client and the network

use crate::{NextPayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Keys whose values are replaced before a body is logged
const SECRET_KEYS: &[&str] = &["api_key", "auth"];

/// Sends a JSON body and returns the raw response body.
///
/// Implementations report network failures as errors for which
/// [`crate::NextPayError::is_transport`] holds. They do not interpret the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<String>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    logging: bool,
}

impl HttpTransport {
    /// Create a transport with an optional per-request timeout
    pub fn new(timeout: Option<Duration>, logging: bool) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| NextPayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, logging))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, logging: bool) -> Self {
        Self { client, logging }
    }

    /// Whether request/response events are emitted
    pub fn logging(&self) -> bool {
        self.logging
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<String> {
        if self.logging {
            debug!(url, body = %redact(body), "nextpay request");
        }

        // the gateway reports outcomes in the body, so HTTP status is not checked
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if self.logging {
            debug!(url, status = status.as_u16(), body = %text, "nextpay response");
        }

        Ok(text)
    }
}

fn redact(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(fields) = body.as_object_mut() {
        for key in SECRET_KEYS {
            if let Some(value) = fields.get_mut(*key) {
                *value = Value::String("<redacted>".to_string());
            }
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_redact_hides_secrets() {
        let body = json!({"api_key": "k", "auth": "a", "amount": 10});
        assert_eq!(
            redact(&body),
            json!({"api_key": "<redacted>", "auth": "<redacted>", "amount": 10})
        );
    }

    #[test]
    fn test_redact_leaves_non_objects() {
        assert_eq!(redact(&json!([1, 2])), json!([1, 2]));
    }

    #[tokio::test]
    async fn test_post_json_sends_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/nx/gateway/token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"amount": 10})))
            .with_status(200)
            .with_body(r#"{"code":-1,"trans_id":"T1"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(Some(Duration::from_secs(5)), true).unwrap();
        let body = transport
            .post_json(&format!("{}/nx/gateway/token", server.url()), &json!({"amount": 10}))
            .await
            .unwrap();

        assert_eq!(body, r#"{"code":-1,"trans_id":"T1"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_still_returns_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/nx/gateway/checkout")
            .with_status(500)
            .with_body(r#"{"code":500,"message":"err"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(None, false).unwrap();
        let body = transport
            .post_json(&format!("{}/nx/gateway/checkout", server.url()), &json!({}))
            .await
            .unwrap();

        assert_eq!(body, r#"{"code":500,"message":"err"}"#);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Post a token body through a transport and return everything it logged
    fn logged_output(logging: bool) -> String {
        let mut server = Server::new();
        let _m = server
            .mock("POST", "/nx/gateway/token")
            .with_status(200)
            .with_body(r#"{"code":-1,"trans_id":"T1"}"#)
            .create();
        let url = format!("{}/nx/gateway/token", server.url());

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let transport = HttpTransport::new(Some(Duration::from_secs(5)), logging).unwrap();
        let body = json!({"api_key": "live-key-5f2c", "amount": 10000});
        tracing::subscriber::with_default(subscriber, || {
            tokio_test::block_on(transport.post_json(&url, &body)).unwrap();
        });

        captured.contents()
    }

    #[test]
    fn test_logging_disabled_emits_nothing() {
        let output = logged_output(false);
        assert!(
            !output.contains("nextpay"),
            "no request/response events expected - actual: {}",
            output
        );
    }

    #[test]
    fn test_logging_enabled_redacts_api_key() {
        let output = logged_output(true);
        assert!(output.contains("nextpay request"), "actual: {}", output);
        assert!(output.contains("nextpay response"), "actual: {}", output);
        assert!(output.contains("<redacted>"), "actual: {}", output);
        assert!(output.contains("T1"), "actual: {}", output);
        assert!(
            !output.contains("live-key-5f2c"),
            "API key MUST NOT be logged - actual: {}",
            output
        );
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/nx/gateway/token", port);

        let transport = HttpTransport::new(Some(Duration::from_secs(2)), false).unwrap();
        let result = tokio_test::block_on(transport.post_json(&url, &json!({})));

        let err = result.unwrap_err();
        assert!(err.is_transport());
        assert!(!err.is_gateway());
    }
}
