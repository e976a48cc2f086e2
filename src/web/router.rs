use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::web::{AppState, admin, auth, forms, pages};

const ROBOTS_TXT_BODY: &str = include_str!("../../robots.txt");
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config().max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(pages::home_page))
        .route("/about", get(pages::content_page))
        .route("/academics", get(pages::content_page))
        .route("/faculty", get(pages::content_page))
        .route("/facilities", get(pages::content_page))
        .route("/events", get(pages::content_page))
        .route("/parents", get(pages::content_page))
        .route(
            "/admissions",
            get(pages::admissions_page).post(forms::submit_admission),
        )
        .route(
            "/contact",
            get(pages::contact_page).post(forms::submit_contact),
        )
        .route("/gallery", get(pages::gallery_page))
        .route("/logo", post(auth::logo_click))
        .route("/admin", get(admin::dashboard))
        .route("/admin/unlock", post(auth::process_unlock))
        .route("/admin/unlock/cancel", post(auth::cancel_unlock))
        .route("/admin/records/delete", post(admin::delete_record))
        .route("/admin/records/:collection/:id", get(admin::record_details))
        .route("/admin/export/:collection", get(admin::export_collection))
        .route(
            "/admin/gallery",
            post(admin::upload_gallery_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/admin/records/:collection", get(admin::list_records_json))
        .route("/healthz", get(healthz))
        .route("/robots.txt", get(robots_txt))
        .fallback(pages::content_page)
        .with_state(state)
}

async fn robots_txt() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        ROBOTS_TXT_BODY,
    )
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
