//! Fetch-based HTTP backend.

use crate::core::envelope::parse_body;
use crate::core::transport::{HttpBackend, Method, NetworkError, PreparedRequest, RawResponse};
use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

/// [`HttpBackend`] using the browser `fetch` API, aborting after the request timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchBackend;

fn request_for(method: Method, url: &str) -> Request {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl HttpBackend for FetchBackend {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, NetworkError> {
        let controller = AbortController::new()
            .map_err(|err| NetworkError::new(format!("abort controller unavailable: {err:?}")))?;
        let signal = controller.signal();
        let timeout_ms = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
        let _deadline = Timeout::new(timeout_ms, move || controller.abort());

        let mut builder = request_for(request.method, &request.url).abort_signal(Some(&signal));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(NetworkError::new)?;
        let status = response.status();
        let text = response.text().await.map_err(NetworkError::new)?;
        Ok(RawResponse {
            status,
            body: parse_body(&text),
        })
    }
}
