//! # catalog-api
//!
//! HTTP surface of the book catalog.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Request Lifecycle                              │
//! │                                                                         │
//! │  TraceLayer ──► Json<T> extractor ──► handler (routes/*)               │
//! │                       │                   │                             │
//! │                       │ rejection         │ Session (state.rs)          │
//! │                       ▼                   ▼                             │
//! │                   ApiError ◄──────── catalog service call              │
//! │                  (error.rs)          CatalogError on failure            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
