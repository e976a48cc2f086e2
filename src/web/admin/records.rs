use axum::{
    Json,
    extract::{Form, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    session::Notice,
    store::{CollectionKind, Record},
    web::{AppState, escape_html, pages::render_for_session, responses::json_error},
};

use super::auth::{require_elevated, require_elevated_json};

#[derive(Deserialize)]
pub struct DeleteRecordForm {
    collection: String,
    id: String,
}

pub async fn delete_record(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<DeleteRecordForm>,
) -> (CookieJar, Redirect) {
    let (jar, mut session) = state.session(jar).await;
    if let Err(redirect) = require_elevated(&mut session) {
        return (jar, redirect);
    }

    let target = CollectionKind::parse(&form.collection)
        .zip(Uuid::parse_str(form.id.trim()).ok());

    if let Some((kind, id)) = target {
        let removed = session.store_mut().delete(kind, id);
        info!(collection = kind.as_str(), %id, removed, "record delete requested");
        session.push_notice(Notice::success(deleted_title(kind)));
    }

    (jar, Redirect::to("/admin"))
}

fn deleted_title(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Admissions => "Admission form deleted",
        CollectionKind::Contacts => "Contact form deleted",
        CollectionKind::Gallery => "Gallery image deleted",
    }
}

pub async fn record_details(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((collection, id)): Path<(String, String)>,
) -> (CookieJar, Result<Html<String>, Redirect>) {
    let (jar, mut session) = state.visit(jar).await;
    if let Err(redirect) = require_elevated(&mut session) {
        return (jar, Err(redirect));
    }

    let record = CollectionKind::parse(&collection)
        .zip(Uuid::parse_str(&id).ok())
        .and_then(|(kind, id)| session.store().find(kind, id));

    let Some(record) = record else {
        session.push_notice(Notice::destructive("Record not found"));
        return (jar, Err(Redirect::to("/admin")));
    };

    let body = render_record(&record);
    let html = render_for_session(&state, &mut session, "Record Details", "/admin", body);
    (jar, Ok(html))
}

fn render_record(record: &Record) -> String {
    let rows = record
        .detail_rows()
        .into_iter()
        .map(|(label, value)| {
            let value = if value.is_empty() { "-".to_string() } else { escape_html(&value) };
            format!("<tr><th>{label}</th><td>{value}</td></tr>")
        })
        .collect::<String>();

    let preview = match record {
        Record::Gallery(image) => format!(
            r#"<p><img src="{}" alt="" style="max-width:100%;border-radius:10px;"></p>"#,
            escape_html(&image.fields().url)
        ),
        Record::Admission(_) | Record::Contact(_) => String::new(),
    };

    format!(
        r#"<section class="panel">
            <p><a href="/admin">← Back to Admin Panel</a></p>
            <h1>{title}</h1>
            {preview}
            <table><tbody>{rows}</tbody></table>
        </section>"#,
        title = escape_html(&record.title()),
    )
}

pub async fn export_collection(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(collection): Path<String>,
) -> (CookieJar, Response) {
    let (jar, mut session) = state.visit(jar).await;
    if let Err(redirect) = require_elevated(&mut session) {
        return (jar, redirect.into_response());
    }

    let Some(kind) = CollectionKind::parse(&collection) else {
        return (jar, StatusCode::NOT_FOUND.into_response());
    };

    let Some(csv) = session.store().collection_csv(kind) else {
        session.push_notice(Notice::destructive("Nothing to export yet"));
        return (jar, Redirect::to("/admin").into_response());
    };

    let filename = format!(
        "{}-{}.csv",
        kind.as_str(),
        Utc::now().format("%Y-%m-%d")
    );
    let response = (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response();

    (jar, response)
}

pub async fn list_records_json(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(collection): Path<String>,
) -> (CookieJar, Response) {
    let (jar, session) = state.visit(jar).await;
    if let Err(rejection) = require_elevated_json(&session) {
        return (jar, rejection.into_response());
    }

    let Some(kind) = CollectionKind::parse(&collection) else {
        return (
            jar,
            json_error(StatusCode::NOT_FOUND, "Unknown collection.").into_response(),
        );
    };

    match session.store().collection_json(kind) {
        Ok(value) => (jar, Json(value).into_response()),
        Err(err) => {
            error!(?err, collection = kind.as_str(), "failed to serialize collection");
            (
                jar,
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load records.")
                    .into_response(),
            )
        }
    }
}
