pub mod admin;
pub mod health;
pub mod public;
pub mod super_admin;
pub mod tenant;

use axum::{
    Json,
    http::{Method, StatusCode, Uri},
};
use serde::Serialize;

use crate::error::ErrorBody;

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

pub async fn route_not_found(method: Method, uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Route not found",
            message: format!("Route {method} {} not found", uri.path()),
            hostname: None,
        }),
    )
}
