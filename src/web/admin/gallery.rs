use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::{
    session::Notice,
    store::{GalleryCategory, GalleryImageFields},
    web::{AppState, uploads::read_gallery_upload},
};

use super::auth::require_elevated;

pub async fn upload_gallery_image(
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> (CookieJar, Redirect) {
    let (jar, mut session) = state.session(jar).await;
    if let Err(redirect) = require_elevated(&mut session) {
        return (jar, redirect);
    }

    let upload = match read_gallery_upload(multipart, state.config().max_upload_bytes).await {
        Ok(upload) => upload,
        Err(err) => {
            warn!(%err, "gallery upload rejected");
            session.push_notice(Notice::destructive("Upload failed").with_description(err.message()));
            return (jar, Redirect::to("/admin"));
        }
    };

    let category = GalleryCategory::parse(&upload.category);
    let (Some(category), Some(image)) = (category, upload.image.as_ref()) else {
        session.push_notice(Notice::destructive("Please fill all required fields"));
        return (jar, Redirect::to("/admin"));
    };
    if upload.title.is_empty() {
        session.push_notice(Notice::destructive("Please fill all required fields"));
        return (jar, Redirect::to("/admin"));
    }

    let record = session.store_mut().add_gallery_image(GalleryImageFields {
        title: upload.title.clone(),
        description: upload.description.clone(),
        category,
        url: image.to_data_url(),
    });
    info!(
        id = %record.id(),
        file = %image.original_name,
        bytes = image.bytes.len(),
        category = category.as_str(),
        "gallery image added"
    );
    session.push_notice(Notice::success("Image uploaded"));

    (jar, Redirect::to("/admin"))
}
