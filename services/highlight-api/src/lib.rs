//! HTTP stand-in for the document viewer: keeps rendered pages in memory,
//! takes citations from the answer pipeline and returns the rewritten
//! segment runs after the passage locator has marked them.

use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use passage_locator::{
    config::Settings,
    dto::{HighlightRequest, HighlightResponse, RenderPageRequest, SegmentView},
    error::AppError,
    palette, PageStore, PassageLocator, TextLayer,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] AppError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::UnknownColor(_) | AppError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownDocument(_) | AppError::PageNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Shared service state. The mutex keeps two invocations from rewriting
/// the same render tree at once.
pub struct AppState {
    locator: PassageLocator,
    default_color: String,
    documents: Mutex<HashMap<String, PageStore>>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            locator: PassageLocator::new(settings.matcher_config()),
            default_color: settings.default_color.clone(),
            documents: Mutex::new(HashMap::new()),
        }
    }

    fn documents(&self) -> actix_web::Result<MutexGuard<'_, HashMap<String, PageStore>>> {
        self.documents
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("document state poisoned"))
    }
}

fn page_view(store: &PageStore, page: usize) -> Vec<SegmentView> {
    store
        .segments(page)
        .map(|segs| segs.iter().map(SegmentView::from).collect())
        .unwrap_or_default()
}

async fn health() -> impl Responder {
    "OK"
}

async fn render_page(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
    web::Json(req): web::Json<RenderPageRequest>,
) -> actix_web::Result<HttpResponse> {
    let (document_id, page) = path.into_inner();
    debug!(%document_id, page, segments = req.segments.len(), "rendering page");
    let mut docs = state.documents()?;
    let store = docs.entry(document_id).or_default();
    store.render_page(page, req.segments);
    debug!(pages = store.page_count(), "page stored");
    Ok(HttpResponse::NoContent().finish())
}

async fn get_page(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
) -> actix_web::Result<HttpResponse> {
    let (document_id, page) = path.into_inner();
    let docs = state.documents()?;
    let Some(store) = docs.get(&document_id) else {
        return Err(ApiError::from(AppError::UnknownDocument(document_id)).into());
    };
    if store.segments(page).is_none() {
        return Err(ApiError::from(AppError::PageNotFound { document_id, page }).into());
    }
    Ok(HttpResponse::Ok().json(page_view(store, page)))
}

async fn clear_highlights(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
) -> actix_web::Result<HttpResponse> {
    let (document_id, page) = path.into_inner();
    let mut docs = state.documents()?;
    let cleared = docs
        .get_mut(&document_id)
        .is_some_and(|store| store.clear_highlights(page));
    if !cleared {
        return Err(ApiError::from(AppError::PageNotFound { document_id, page }).into());
    }
    Ok(HttpResponse::NoContent().finish())
}

async fn highlight(
    state: web::Data<AppState>,
    web::Json(req): web::Json<HighlightRequest>,
) -> actix_web::Result<HttpResponse> {
    let citation = req.citation;
    let color = match req.color {
        Some(key) => palette::resolve(&key)
            .ok_or_else(|| ApiError::from(AppError::UnknownColor(key)))?,
        None => palette::resolve_or_default(&state.default_color),
    };
    let page = citation
        .page_index()
        .ok_or_else(|| ApiError::from(AppError::InvalidPage(citation.page_number)))?;

    let mut docs = state.documents()?;
    let (outcome, segments) = match docs.get_mut(&citation.document_id) {
        Some(store) => {
            let outcome = state.locator.highlight(store, page, &citation.text, color);
            (outcome, page_view(store, page))
        }
        None => {
            // viewer has not rendered anything for this document yet
            let mut blank = PageStore::new();
            let outcome = state.locator.highlight(&mut blank, page, &citation.text, color);
            (outcome, Vec::new())
        }
    };

    if outcome.found {
        info!(document_id = %citation.document_id, page, "citation highlighted");
    } else {
        warn!(
            document_id = %citation.document_id,
            page,
            reason = ?outcome.miss,
            "citation not highlighted"
        );
    }

    Ok(HttpResponse::Ok().json(HighlightResponse {
        found: outcome.found,
        reason: outcome.miss.map(|m| m.to_string()),
        score: outcome.matched.map(|m| m.score),
        segments,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/highlight", web::post().to(highlight))
        .route("/documents/{id}/pages/{page}", web::put().to(render_page))
        .route("/documents/{id}/pages/{page}", web::get().to(get_page))
        .route(
            "/documents/{id}/pages/{page}/highlights",
            web::delete().to(clear_highlights),
        );
}
