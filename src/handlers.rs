use actix_web::{get, web, HttpResponse, Responder};

use crate::error::ApiError;
use crate::static_files;
use crate::types::AppState;

/// Coin listing proxy: one pass-through call, body relayed verbatim.
#[get("/coins")]
pub async fn get_coins(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (status, body) = data.upstream.markets().await?;
    Ok(HttpResponse::build(status)
        .content_type("application/json")
        .body(body))
}

/// 7-day price history proxy for a single coin.
#[get("/coin/{coin_id}/chart")]
pub async fn get_chart(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let coin_id = path.into_inner();
    let (status, body) = data.upstream.market_chart(&coin_id).await?;
    Ok(HttpResponse::build(status)
        .content_type("application/json")
        .body(body))
}

/// Root route: the exact bytes of the configured entry file.
#[get("/")]
pub async fn index(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (content, content_type) = static_files::serve(&data.frontend_dir, &data.index_file).await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(content))
}

/// Frontend bundle files under the configured directory.
#[get("/frontend/{path:.*}")]
pub async fn frontend(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request_path = path.into_inner();
    let (content, content_type) = static_files::serve(&data.frontend_dir, &request_path).await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(content))
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    web::Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
