//! Settings panel for the portfolio tracker: currency registry, settings
//! store, conversion helpers, the settings page and the backend client.

pub mod api;
pub mod cli;
pub mod commands;
pub mod models;
pub mod services;
pub mod utils;
