use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` with the rejection routed through [`Error`], so a
/// malformed request body answers 400 with the same `{"error": ...}`
/// shape as every other failure instead of axum's stock 422 plain text.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);
