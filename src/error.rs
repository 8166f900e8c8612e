//! Errors raised while wiring the decorative layer to the DOM.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Setup failures. None of these reach the page: callers log and degrade.
#[derive(Debug, Error)]
pub enum DecorError {
	/// No global `window` (not running in a browser).
	#[error("no global window available")]
	NoWindow,
	/// The canvas refused to hand out a 2d context.
	#[error("canvas 2d context unavailable")]
	NoContext,
	/// A DOM call threw.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for DecorError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
