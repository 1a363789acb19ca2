#[macro_use]
extern crate rust_i18n;

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod fetch;
pub mod session;
pub mod startup;

// Initialize i18n
i18n!("locales", fallback = "en");
