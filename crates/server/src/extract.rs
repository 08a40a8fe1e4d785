use axum::extract::FromRequest;

use crate::errors::JsonApiError;

/// `Json` whose rejections render as `{ error, message }`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct JsonBody<T>(pub T);
