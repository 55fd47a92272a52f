use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor whose rejection is an [`ApiError`], so malformed
/// bodies get the same `{code, message}` response as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
