use axum::{Json, http::StatusCode, response::Redirect};

use crate::{
    session::{Notice, SiteSession},
    web::responses::{ApiMessage, json_error},
};

/// Gate for admin pages: Normal sessions are sent home with a notice.
pub fn require_elevated(session: &mut SiteSession) -> Result<(), Redirect> {
    if session.is_elevated() {
        return Ok(());
    }

    session.push_notice(
        Notice::destructive("Access Denied")
            .with_description("Please login as admin to access this page."),
    );
    Err(Redirect::to("/"))
}

/// Gate for admin JSON endpoints.
pub fn require_elevated_json(session: &SiteSession) -> Result<(), (StatusCode, Json<ApiMessage>)> {
    if session.is_elevated() {
        Ok(())
    } else {
        Err(json_error(StatusCode::FORBIDDEN, "Admin mode is required."))
    }
}
