use axum::{extract::State, response::Html, response::Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    store::{CollectionKind, GalleryCategory, SubmissionStore},
    web::{AppState, escape_html, pages::render_for_session},
};

use super::auth::require_elevated;

pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Result<Html<String>, Redirect>) {
    let (jar, mut session) = state.visit(jar).await;
    if let Err(redirect) = require_elevated(&mut session) {
        return (jar, Err(redirect));
    }

    let store = session.store();
    let body = format!(
        r#"<section class="panel">
            <h1>Admin Panel</h1>
            <p class="note">Manage submissions and website content</p>
        </section>
        <section class="grid">
            {stats}
        </section>
        <section class="panel">
            <h2>Admissions ({admission_count}) {admission_export}</h2>
            {admissions}
        </section>
        <section class="panel">
            <h2>Contacts ({contact_count}) {contact_export}</h2>
            {contacts}
        </section>
        <section class="panel">
            <h2>Gallery ({gallery_count}) {gallery_export}</h2>
            {gallery}
            {upload_form}
        </section>
        <section class="panel">
            <h3>Admin Panel Information</h3>
            <p class="note">This admin panel allows you to view and manage admission applications, contact form submissions and gallery images. To log out of admin mode, click the school logo three times.</p>
        </section>"#,
        stats = render_stats(store),
        admission_count = store.len(CollectionKind::Admissions),
        contact_count = store.len(CollectionKind::Contacts),
        gallery_count = store.len(CollectionKind::Gallery),
        admission_export = export_link(store, CollectionKind::Admissions),
        contact_export = export_link(store, CollectionKind::Contacts),
        gallery_export = export_link(store, CollectionKind::Gallery),
        admissions = render_admissions(store),
        contacts = render_contacts(store),
        gallery = render_gallery(store),
        upload_form = render_upload_form(),
    );

    let html = render_for_session(&state, &mut session, "Admin Panel", "/admin", body);
    (jar, Ok(html))
}

fn render_stats(store: &SubmissionStore) -> String {
    [
        (store.len(CollectionKind::Admissions).to_string(), "Admission Applications"),
        (store.len(CollectionKind::Contacts).to_string(), "Contact Messages"),
        (store.len(CollectionKind::Gallery).to_string(), "Gallery Uploads"),
        ("Active".to_string(), "Admin Status"),
    ]
    .iter()
    .map(|(value, label)| format!(r#"<div class="card"><h3>{value}</h3><p class="note">{label}</p></div>"#))
    .collect::<Vec<_>>()
    .join("")
}

/// The export link is omitted for empty collections.
fn export_link(store: &SubmissionStore, kind: CollectionKind) -> String {
    if store.len(kind) == 0 {
        return String::new();
    }
    format!(
        r#"<a class="admin-link" href="/admin/export/{kind}">Export CSV</a>"#,
        kind = kind.as_str()
    )
}

fn row_actions(kind: CollectionKind, id: &str) -> String {
    format!(
        r#"<a href="/admin/records/{kind}/{id}">View</a>
        <form method="post" action="/admin/records/delete" style="display:inline" onsubmit="return confirm('Delete this record?');">
            <input type="hidden" name="collection" value="{kind}">
            <input type="hidden" name="id" value="{id}">
            <button type="submit" class="danger">Delete</button>
        </form>"#,
        kind = kind.as_str(),
    )
}

fn empty_state(message: &str) -> String {
    format!(r#"<p class="note">{message}</p>"#)
}

fn render_admissions(store: &SubmissionStore) -> String {
    let records = store.admissions();
    if records.is_empty() {
        return empty_state("No admission applications yet");
    }

    let rows = records
        .iter()
        .map(|record| {
            let f = record.fields();
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&f.student_name),
                escape_html(&f.parent_name),
                escape_html(&f.class_applying),
                escape_html(&f.email),
                escape_html(&f.phone),
                record.submitted_at().format("%Y-%m-%d"),
                row_actions(CollectionKind::Admissions, &record.id().to_string()),
            )
        })
        .collect::<String>();

    format!(
        "<table><thead><tr><th>Student Name</th><th>Parent Name</th><th>Class</th><th>Email</th><th>Phone</th><th>Submitted</th><th>Action</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn render_contacts(store: &SubmissionStore) -> String {
    let records = store.contacts();
    if records.is_empty() {
        return empty_state("No contact messages yet");
    }

    let rows = records
        .iter()
        .map(|record| {
            let f = record.fields();
            let subject = if f.subject.is_empty() { "-" } else { f.subject.as_str() };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"truncate\">{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&f.name),
                escape_html(&f.email),
                escape_html(subject),
                escape_html(&f.message),
                record.submitted_at().format("%Y-%m-%d"),
                row_actions(CollectionKind::Contacts, &record.id().to_string()),
            )
        })
        .collect::<String>();

    format!(
        "<table><thead><tr><th>Name</th><th>Email</th><th>Subject</th><th>Message</th><th>Submitted</th><th>Action</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn render_gallery(store: &SubmissionStore) -> String {
    let records = store.gallery_images();
    if records.is_empty() {
        return empty_state("No gallery images uploaded yet");
    }

    let rows = records
        .iter()
        .map(|record| {
            let f = record.fields();
            format!(
                r#"<tr><td><img src="{}" alt="" style="width:4rem;border-radius:6px;"></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                escape_html(&f.url),
                escape_html(&f.title),
                f.category.label(),
                record.submitted_at().format("%Y-%m-%d"),
                row_actions(CollectionKind::Gallery, &record.id().to_string()),
            )
        })
        .collect::<String>();

    format!(
        "<table><thead><tr><th>Preview</th><th>Title</th><th>Category</th><th>Uploaded</th><th>Action</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn render_upload_form() -> String {
    let options = GalleryCategory::ALL
        .iter()
        .map(|category| {
            format!(
                r#"<option value="{}">{}</option>"#,
                category.as_str(),
                category.label()
            )
        })
        .collect::<String>();

    format!(
        r#"<h3>Upload Image</h3>
        <form method="post" action="/admin/gallery" enctype="multipart/form-data">
            <label for="title">Title *</label>
            <input id="title" name="title" required>
            <label for="description">Description</label>
            <input id="description" name="description">
            <label for="category">Category *</label>
            <select id="category" name="category">{options}</select>
            <label for="image">Image *</label>
            <input id="image" type="file" name="image" accept="image/*" required>
            <p><button type="submit">Upload</button></p>
        </form>"#
    )
}
