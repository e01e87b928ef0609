// src/lib.rs

pub mod api;
pub mod app;
pub mod auth;
pub mod chat_message;
pub mod chat_view;
pub mod config;
pub mod constants;
pub mod errors;
pub mod faq_manager_view;
pub mod home_view;
pub mod kb_view;
pub mod key_handlers;
pub mod login_view;
pub mod logging;
pub mod models;
pub mod register_view;
pub mod resolver;
pub mod status_indicator;
pub mod store;
pub mod ui;

pub use app::{App, AppScreen};
