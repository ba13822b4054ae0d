//! HTTP handlers, one module per resource.

pub mod home;
pub mod login;
pub mod posts;
pub mod users;

use axum::{
    Json,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 201 with a `Location` header pointing at the new resource.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(LOCATION, location)], Json(body)).into_response()
}

/// 204 carrying the removed id in an `Entity` header.
pub(crate) fn deleted(id: i64) -> Response {
    (StatusCode::NO_CONTENT, [("entity", id.to_string())]).into_response()
}
