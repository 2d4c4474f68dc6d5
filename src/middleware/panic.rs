use std::any::Any;

use axum::{http::StatusCode, response::Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{logging::panic_message, response::error_response};

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_json)
}

/// Debug builds echo the panic text to the client; release builds do not.
fn panic_to_json(panic: Box<dyn Any + Send + 'static>) -> Response {
    let client_message = if cfg!(debug_assertions) {
        format!("internal server error: {}", panic_message(panic.as_ref()))
    } else {
        "internal server error".to_string()
    };

    error_response(StatusCode::INTERNAL_SERVER_ERROR, &client_message)
}
