//! Cash register reconciliation ("arqueo de caja") engine.
//!
//! This crate computes end-of-shift reconciliation totals from submitted
//! denomination counts, non-cash receipts, and invoice ranges; persists the
//! records; and renders printable summary reports over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
