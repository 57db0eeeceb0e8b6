//! Native (non-browser) platform bindings: reqwest transport and tokio timers.

use crate::core::envelope::parse_body;
use crate::core::session::Scheduler;
use crate::core::transport::{HttpBackend, Method, NetworkError, PreparedRequest, RawResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// [`HttpBackend`] over a shared reqwest client.
#[derive(Clone, Debug, Default)]
pub struct ReqwestBackend {
    client: Client,
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, NetworkError> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(NetworkError::new)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(NetworkError::new)?;
        Ok(RawResponse {
            status,
            body: parse_body(&text),
        })
    }
}

/// [`Scheduler`] backed by `tokio::time`. Must be used inside a `LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
