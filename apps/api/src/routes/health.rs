use axum::{extract::Query, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "Enhanced Resume Analyzer API";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /
/// Describes the service and its endpoints.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Extracts structured JSON data from resumes",
        "endpoints": {
            "analyze_resume": "POST /analyze-resume",
            "health": "GET /health",
            "profiles": "GET /profiles"
        }
    }))
}

#[derive(Debug, Deserialize)]
pub struct ProfilesQuery {
    pub limit: Option<u32>,
}

/// GET /profiles
/// Analyses are never persisted, so the listing is always empty.
pub async fn profiles_handler(Query(params): Query<ProfilesQuery>) -> Json<Value> {
    Json(json!({
        "profiles": [],
        "total": 0,
        "limit": params.limit.unwrap_or(10),
        "message": "Database storage is disabled in this deployment"
    }))
}
