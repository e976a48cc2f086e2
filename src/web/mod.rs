pub mod admin;
pub mod admin_utils;
pub mod auth;
pub mod forms;
pub mod pages;
pub mod responses;
pub mod router;
pub mod state;
pub mod templates;
pub mod uploads;

pub use state::{AppState, SESSION_COOKIE, VisitorSession};
pub use templates::escape_html;
