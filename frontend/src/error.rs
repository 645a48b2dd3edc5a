use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
    #[error("Browser API error: {0}")]
    Js(String),
    #[error("Page is not initialized yet")]
    NotReady,
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        LandingError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<LandingError> for JsValue {
    fn from(err: LandingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
