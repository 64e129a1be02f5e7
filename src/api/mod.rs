//! HTTP API module for the arqueo engine.
//!
//! This module provides the REST endpoints for submitting reconciliations,
//! listing stored arqueos, and downloading printable reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ArqueoRequest;
pub use response::{ApiError, FormBootstrap, SaveResponse};
pub use state::AppState;
