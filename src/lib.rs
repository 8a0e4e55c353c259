pub mod api;
pub mod config;
pub mod error;
pub mod map;
pub mod models;
pub mod session;
pub mod track;
