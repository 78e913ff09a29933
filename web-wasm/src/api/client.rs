//! `fetch` transport for the requests built in `careersync_common::api`
//!
//! Responses are read as text and parsed with `serde_json`, so the same
//! parsers run in the native tests.

use careersync_common::api::{check_response, parse_response, ApiRequest, Body};
use careersync_common::{ClientConfig, Error, Result};
use serde::de::DeserializeOwned;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// Form part name of the uploaded resume
pub const RESUME_PART: &str = "resume";

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub fn js_error(value: JsValue) -> Error {
    Error::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self { api_base: config.api_base.clone() }
    }

    /// Execute `request`. Multipart bodies get `file` appended as the
    /// resume part.
    pub async fn send(&self, request: &ApiRequest, file: Option<&File>) -> Result<RawResponse> {
        let url = request.url(&self.api_base);

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::SameOrigin);

        let mut json_body = false;
        match &request.body {
            Body::Empty => {}
            Body::Json(fields) => {
                let body = serde_json::to_string(fields)?;
                opts.set_body(&JsValue::from_str(&body));
                json_body = true;
            }
            Body::Multipart(fields) => {
                let form = FormData::new().map_err(js_error)?;
                for (name, value) in fields {
                    form.append_with_str(name, value).map_err(js_error)?;
                }
                if let Some(file) = file {
                    form.append_with_blob_and_filename(RESUME_PART, file, &file.name())
                        .map_err(js_error)?;
                }
                opts.set_body(&form);
            }
        }

        let req = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        req.headers().set("Accept", "application/json").map_err(js_error)?;
        if json_body {
            req.headers().set("Content-Type", "application/json").map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| Error::Transport("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&req)).await.map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?).await.map_err(js_error)?;
        let body = text.as_string().unwrap_or_default();

        debug!(method = request.method.as_str(), url = %url, status = resp.status(), "request finished");
        Ok(RawResponse { status: resp.status(), body })
    }

    /// Execute and decode a JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let raw = self.send(request, None).await?;
        parse_response(raw.status, &raw.body)
    }

    /// Execute and only check the status.
    pub async fn fetch_ok(&self, request: &ApiRequest) -> Result<()> {
        let raw = self.send(request, None).await?;
        check_response(raw.status, &raw.body)
    }

    /// Multipart upload with an optional file part.
    pub async fn upload<T: DeserializeOwned>(&self, request: &ApiRequest, file: Option<&File>) -> Result<T> {
        let raw = self.send(request, file).await?;
        parse_response(raw.status, &raw.body)
    }
}
