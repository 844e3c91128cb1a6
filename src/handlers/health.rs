// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Liveness probe; never touches the database

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
