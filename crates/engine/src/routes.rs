//! HTTP route handlers for the recommendation service
//!
//! Thin plumbing over the engine's two operations. An empty result is a
//! normal 200 response with an empty array: "no match" is not an error
//! anywhere on the scoring path.

use crate::hybrid::HybridRecommender;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::debug;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/titles", web::get().to(list_titles))
            .route(
                "/recommendations/{title}",
                web::get().to(get_recommendations),
            ),
    );
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    /// Content weight; defaults to the engine's configured alpha
    pub alpha: Option<f32>,
}

async fn list_titles(engine: web::Data<HybridRecommender>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "titles": engine.titles(),
    }))
}

async fn get_recommendations(
    path: web::Path<String>,
    query: web::Query<RecommendQuery>,
    engine: web::Data<HybridRecommender>,
) -> impl Responder {
    let title = path.into_inner();
    let alpha = query.alpha.unwrap_or_else(|| engine.default_alpha());
    let recommendations = engine.recommend(&title, alpha);
    debug!(%title, alpha, count = recommendations.len(), "Served recommendations");

    HttpResponse::Ok().json(serde_json::json!({
        "title": title,
        "alpha": alpha,
        "recommendations": recommendations,
    }))
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "cinematch-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
