use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub database: String,
}

/// GET /health
pub async fn health_check(db: Option<web::Data<MongoDB>>) -> impl Responder {
    let database = match &db {
        Some(db) => match db.health_check().await {
            Ok(_) => "connected",
            Err(e) => {
                log::error!("❌ Health check: database unreachable: {}", e);
                "unreachable"
            }
        },
        None => "unconfigured",
    };

    let healthy = database == "connected";
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        service: "blog-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        database: database.to_string(),
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
