use architect_core::transform::{self, TransformConfig, TransformError, TransformRequest};
use architect_core::HouseLayout;

/// Blocking client for the layout transform.
pub struct GeminiClient {
    config: TransformConfig,
    http: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(config: TransformConfig) -> Self {
        GeminiClient {
            config,
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn transform(
        &self,
        layout: &HouseLayout,
        instruction: &str,
    ) -> Result<HouseLayout, TransformError> {
        let req = transform::build_request(&self.config, layout, instruction)?;
        log::debug!("POST {}", req.url);
        let resp = self
            .http
            .post(&req.url)
            .header(TransformRequest::API_KEY_HEADER, &req.api_key)
            .header("Content-Type", "application/json")
            .body(req.body)
            .send()
            .map_err(|e| TransformError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| TransformError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(TransformError::Status {
                status: status.as_u16(),
                body,
            });
        }
        transform::parse_response(&body)
    }
}
