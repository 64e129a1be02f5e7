//! PDF rendering sink.
//!
//! Turns a [`ReportDocument`] into PDF bytes with `genpdf`. The renderer
//! knows nothing about arqueos: it maps line styles to fonts and sizes and
//! lets `genpdf` handle pagination.

use genpdf::elements::{Break, Paragraph};
use genpdf::style::Style;
use genpdf::{Element, Margins, SimplePageDecorator};

use crate::config::ReportConfig;
use crate::error::{EngineError, EngineResult};

use super::document::{LineStyle, ReportDocument};

/// Renders the report into PDF bytes.
///
/// The font family is loaded from `config.fonts_dir`; a missing or broken
/// font directory surfaces as [`EngineError::Render`], never a panic.
pub fn render_pdf(document: &ReportDocument, config: &ReportConfig) -> EngineResult<Vec<u8>> {
    let font_family =
        genpdf::fonts::from_files(&config.fonts_dir, &config.font_family, None).map_err(|e| {
            EngineError::Render {
                message: format!(
                    "cannot load font family '{}' from {}: {}",
                    config.font_family, config.fonts_dir, e
                ),
            }
        })?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title("Arqueo de caja");
    doc.set_paper_size(genpdf::PaperSize::Letter);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(14, 14, 14, 14));
    doc.set_page_decorator(decorator);

    for line in &document.lines {
        match line.style {
            LineStyle::Title => {
                doc.push(Paragraph::new(&line.text).styled(Style::new().bold().with_font_size(14)));
                doc.push(Break::new(0.5));
            }
            LineStyle::Heading => {
                doc.push(Break::new(0.5));
                doc.push(Paragraph::new(&line.text).styled(Style::new().bold().with_font_size(12)));
            }
            LineStyle::Body => {
                doc.push(Paragraph::new(&line.text).styled(Style::new().with_font_size(10)));
            }
            LineStyle::GroupLabel => {
                doc.push(Paragraph::new(&line.text).styled(Style::new().bold().with_font_size(10)));
            }
            LineStyle::Detail => {
                doc.push(
                    Paragraph::new(&line.text)
                        .styled(Style::new().with_font_size(9))
                        .padded(Margins::trbl(0, 0, 0, 5)),
                );
            }
            LineStyle::Footer => {
                doc.push(Break::new(1.0));
                doc.push(
                    Paragraph::new(&line.text).styled(Style::new().italic().with_font_size(9)),
                );
            }
        }
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(|e| EngineError::Render {
        message: e.to_string(),
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::ReportLine;

    #[test]
    fn test_missing_fonts_dir_is_render_error() {
        let document = ReportDocument {
            filename: "arqueo_1.pdf".to_string(),
            lines: vec![ReportLine {
                style: LineStyle::Title,
                text: "ARQUEO DE CAJA".to_string(),
            }],
        };
        let config = ReportConfig {
            fonts_dir: "/definitely/not/a/fonts/dir".to_string(),
            font_family: "LiberationSans".to_string(),
        };

        let result = render_pdf(&document, &config);
        match result {
            Err(EngineError::Render { message }) => {
                assert!(message.contains("LiberationSans"));
            }
            other => panic!("expected Render error, got {:?}", other.map(|b| b.len())),
        }
    }
}
