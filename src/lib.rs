//! Website service for a private school: public pages, admission and contact
//! forms, and a per-visitor admin mode unlocked from the site logo.

pub mod config;
pub mod maintenance;
pub mod session;
pub mod store;
pub mod web;
