//! Printable arqueo report.
//!
//! Split in two layers: [`build_report`] lays the document out as a pure
//! sequence of styled lines, and [`render_pdf`] feeds those lines to the
//! `genpdf` sink. Only the second layer touches fonts or produces bytes.

mod document;
mod pdf;

pub use document::{build_report, LineStyle, ReportDocument, ReportLine};
pub use pdf::render_pdf;
