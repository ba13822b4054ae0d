use axum::Json;

/// GET / -> greeting, doubles as a liveness probe.
pub async fn home() -> Json<&'static str> {
    Json("Welcome to the API")
}
