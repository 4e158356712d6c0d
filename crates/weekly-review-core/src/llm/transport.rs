//! `ureq`-backed HTTP transport

use tracing::debug;
use ureq::Agent;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Blocking HTTP transport built on a shared `ureq` agent.
///
/// Error statuses are returned as ordinary responses so the chat client can
/// tell a failed exchange apart from one that never completed.
pub struct UreqTransport {
    agent: Agent,
    user_agent: String,
}

impl UreqTransport {
    pub fn new() -> Self {
        let config = Agent::config_builder().http_status_as_error(false).build();
        let user_agent = format!(
            "weekly-review/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );

        Self {
            agent: config.into(),
            user_agent,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        if request.method != "POST" {
            return Err(TransportError(format!(
                "unsupported method: {}",
                request.method
            )));
        }

        let mut builder = self
            .agent
            .post(request.url.as_str())
            .config()
            .timeout_global(Some(request.timeout))
            .build()
            .header("User-Agent", self.user_agent.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .send(request.body.as_str())
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let text = match response.body_mut().read_to_string() {
            Ok(text) => text,
            // The status line already arrived, so the exchange completed
            Err(e) if status >= 400 => {
                debug!(status, error = %e, "discarding unreadable error body");
                String::new()
            }
            Err(e) => {
                return Err(TransportError(format!(
                    "failed to read response body: {}",
                    e
                )))
            }
        };

        Ok(HttpResponse { status, text })
    }
}
