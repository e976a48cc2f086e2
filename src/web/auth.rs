use std::time::Instant;

use axum::{
    Json,
    extract::{Form, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::web::{AppState, admin_utils::sanitize_redirect, responses::GestureReply};

#[derive(Deserialize)]
pub struct UnlockForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelForm {
    #[serde(default)]
    pub redirect: Option<String>,
}

/// One click on the site logo.
pub async fn logo_click(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<GestureReply>) {
    let (jar, mut session) = state.session(jar).await;
    let action = session.logo_activated(Instant::now());

    (
        jar,
        Json(GestureReply {
            action: action.as_str(),
        }),
    )
}

pub async fn process_unlock(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<UnlockForm>,
) -> (CookieJar, Redirect) {
    let (jar, mut session) = state.session(jar).await;
    let redirect = sanitize_redirect(form.redirect.as_deref());

    session.submit_credential(&form.password, state.credential());

    (jar, Redirect::to(redirect))
}

pub async fn cancel_unlock(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CancelForm>,
) -> (CookieJar, Redirect) {
    let (jar, mut session) = state.session(jar).await;
    session.close_prompt();

    (jar, Redirect::to(sanitize_redirect(form.redirect.as_deref())))
}
