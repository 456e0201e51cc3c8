//! # Preview endpoint
//!
//! `GET /api/preview-url?url=<absolute url>` fetches the page and answers with its
//! preview metadata as JSON.
//!
//! - `200 OK`: `{ "url", "title"?, "description"?, "image"? }`, absent fields omitted.
//! - `400 Bad Request`: `{ "error" }` when `url` is missing, empty or repeated.
//! - `500 Internal Server Error`: `{ "error" }` when the page could not be previewed.

use actix_web::{web, App, HttpResponse, HttpServer};
use preview_engine::{FetchSettings, PageExtractor};
use preview_logging::{preview_info, preview_warn};
use serde::Serialize;

/// The path of the preview endpoint.
const API_PATH: &str = "/api/preview-url";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn run(host: &str, port: u16, settings: FetchSettings) -> std::io::Result<()> {
    let extractor = web::Data::new(PageExtractor::new(settings));
    let host = host.to_string();
    actix_web::rt::System::new().block_on(async move {
        preview_info!("Preview server running at http://{}:{}{}", host, port, API_PATH);
        HttpServer::new(move || {
            App::new()
                .app_data(extractor.clone())
                .configure(configure_routes)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    })
}

/// Registers `GET /api/preview-url`. Expects `web::Data<PageExtractor>` in app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(API_PATH, web::get().to(preview_url));
}

async fn preview_url(
    extractor: web::Data<PageExtractor>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let url = match single_url_param(&query) {
        Ok(url) => url,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorBody {
                error: message.to_string(),
            })
        }
    };

    match extractor.extract(url).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => {
            preview_warn!("Preview for {} failed: {}", url, err);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: format!("failed to build url preview: {err}"),
            })
        }
    }
}

fn single_url_param(pairs: &[(String, String)]) -> Result<&str, &'static str> {
    let mut values = pairs
        .iter()
        .filter(|(key, _)| key == "url")
        .map(|(_, value)| value.as_str());
    match (values.next(), values.next()) {
        (Some(url), None) if !url.trim().is_empty() => Ok(url),
        (Some(_), Some(_)) => Err("url parameter must be given once"),
        _ => Err("url parameter is missing or empty"),
    }
}
