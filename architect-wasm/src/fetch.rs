use architect_core::transform::{self, TransformConfig, TransformError, TransformRequest};
use architect_core::HouseLayout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, Window};

fn network(e: JsValue) -> TransformError {
    TransformError::Network(format!("{e:?}"))
}

/// POST the layout and instruction to the model and parse the reply.
pub async fn transform_layout(
    window: &Window,
    config: &TransformConfig,
    layout: &HouseLayout,
    instruction: &str,
) -> Result<HouseLayout, TransformError> {
    let req = transform::build_request(config, layout, instruction)?;
    let headers = Headers::new().map_err(network)?;
    headers
        .set(TransformRequest::API_KEY_HEADER, &req.api_key)
        .map_err(network)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(network)?;
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(&req.body));
    let request = Request::new_with_str_and_init(&req.url, &opts).map_err(network)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?;
    let resp: Response = resp_value.dyn_into().map_err(network)?;
    let text = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();
    if !resp.ok() {
        return Err(TransformError::Status {
            status: resp.status(),
            body: text,
        });
    }
    transform::parse_response(&text)
}
