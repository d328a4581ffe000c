use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` extractor whose rejections use the API's `{"detail": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
