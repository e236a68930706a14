use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("No browser window available")]
    NoWindow,
    #[error("Expected element is missing: {0}")]
    MissingElement(&'static str),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Invalid landing config: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for LandingError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value).ok().map(String::from)
            })
            .unwrap_or_else(|| format!("{value:?}"));
        LandingError::Js(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<LandingError> for wasm_bindgen::JsValue {
    fn from(err: LandingError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Outcome of a waitlist signup that did not go through.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Not a valid email address")]
    InvalidEmail,
    #[error("A submission is already in flight")]
    InFlight,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Waitlist rejected the signup (status {status})")]
    Rejected { status: u16 },
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}
