//! Leadlinker - a URL shortener with lead-capture forms
//!
//! Short codes either redirect straight to their destination or present a
//! form first; submissions, clicks and redirects are recorded per link.
//!
//! # Architecture
//! - `api`: HTTP endpoints, middleware and the management API
//! - `services`: resolution, submission, link/form management, statistics
//! - `storage`: store traits and the SeaORM backend
//! - `config`: static configuration (file + environment)
//! - `runtime`: server startup and shutdown
//! - `system`: logging initialization
//! - `utils`: short codes, URL validation, client IP, time parsing

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
