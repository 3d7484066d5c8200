//! REST API for colorfinder.
//!
//! Serves JSON endpoints over a single palette loaded at startup and shared
//! read-only between workers.
//!
//! ## Endpoints
//!
//! - `POST /search` - Find the nearest named colors for one or more queries
//! - `POST /parse` - Validate color strings and return their canonical form
//! - `GET /count` - Number of records in the palette
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpServer};
//! use colorfinder::Palette;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let palette = web::Data::new(Palette::builtin().unwrap());
//!     HttpServer::new(move || {
//!         App::new()
//!             .app_data(palette.clone())
//!             .configure(colorfinder::server::config)
//!     })
//!     .bind("0.0.0.0:7878")?
//!     .run()
//!     .await
//! }
//! ```

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use crate::{Color, Palette, DEFAULT_LIMIT};


// --- Request structs ---

#[derive(Deserialize)]
struct Query {
    color: String,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct SearchRequest {
    queries: Vec<Query>,
}

#[derive(Deserialize)]
struct ParseRequest {
    colors: Vec<String>,
}

// --- Response structs ---

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchResultGroup>,
}

#[derive(Serialize)]
struct SearchResultGroup {
    query: String,
    matches: Vec<MatchResult>,
    message: String,
}

#[derive(Serialize)]
struct MatchResult {
    id: String,
    name: String,
    color: String,
    distance: f64,
}

#[derive(Serialize)]
struct ParseResponse {
    results: Vec<ParseResult>,
}

#[derive(Serialize)]
struct ParseResult {
    input: String,
    color: Option<String>,
    rgb: Option<[u8; 3]>,
    error: Option<String>,
}

#[derive(Serialize)]
struct CountResponse {
    count: usize,
}

// --- Handlers ---

async fn search_handler(
    palette: web::Data<Palette>,
    body: web::Json<SearchRequest>,
) -> impl Responder {
    let mut results = Vec::new();

    for entry in &body.queries {
        match Color::parse(entry.color.trim()) {
            Ok(query) => {
                let limit = entry.limit.unwrap_or(DEFAULT_LIMIT);
                results.push(SearchResultGroup {
                    query: query.format(),
                    matches: palette.search(&query, limit)
                        .into_iter()
                        .map(|m| MatchResult {
                            id: m.id,
                            name: m.name,
                            color: m.color.format(),
                            distance: m.distance,
                        })
                        .collect(),
                    message: "Search Success".to_string(),
                });
            }
            Err(e) => {
                results.push(SearchResultGroup {
                    query: entry.color.clone(),
                    matches: Vec::new(),
                    message: e.to_string(),
                });
            }
        }
    }

    HttpResponse::Ok().json(SearchResponse { results })
}

async fn parse_handler(body: web::Json<ParseRequest>) -> impl Responder {
    let results = body.colors.iter()
        .map(|input| match Color::parse(input.trim()) {
            Ok(color) => ParseResult {
                input: input.clone(),
                color: Some(color.format()),
                rgb: Some(color.channels()),
                error: None,
            },
            Err(e) => ParseResult {
                input: input.clone(),
                color: None,
                rgb: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    HttpResponse::Ok().json(ParseResponse { results })
}

async fn count_handler(palette: web::Data<Palette>) -> impl Responder {
    HttpResponse::Ok().json(CountResponse { count: palette.count() })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/search").route(web::post().to(search_handler)))
       .service(web::resource("/parse").route(web::post().to(parse_handler)))
       .service(web::resource("/count").route(web::get().to(count_handler)));
}
