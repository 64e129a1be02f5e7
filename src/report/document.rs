//! Printable report layout.
//!
//! Builds the arqueo summary document as a pure sequence of styled lines.
//! Keeping layout separate from the PDF sink means every section of the
//! report is testable without font files or a renderer.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::models::{FactContado, InvoiceKind, NonCashEntry, StoredArqueo};

/// Visual treatment of one report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Document title.
    Title,
    /// Section heading.
    Heading,
    /// Regular body text.
    Body,
    /// Bold in-section group label.
    GroupLabel,
    /// Indented small detail under a group label.
    Detail,
    /// Italic footer.
    Footer,
}

/// One line of the printable report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    /// How the line is styled.
    pub style: LineStyle,
    /// The text content.
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// The full report as an ordered sequence of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Suggested file name for the rendered artifact.
    pub filename: String,
    /// The lines, in print order.
    pub lines: Vec<ReportLine>,
}

/// Formats a monetary amount with two decimals.
fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Renders a loosely-typed quantity the way it was submitted.
fn quantity_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Builds the printable report for a stored arqueo.
///
/// Mirrors the layout of the original printed summary: header, denomination
/// breakdown (largest face value first), per-category non-cash totals, the
/// itemized non-cash detail grouped by tipo, both invoice sections, the
/// summary block with the SOBRA/FALTA/CUADRADO tag, and a generation
/// footer.
pub fn build_report(arqueo: &StoredArqueo) -> ReportDocument {
    let record = &arqueo.record;
    let totals = &arqueo.totals;
    let mut lines = Vec::new();

    lines.push(ReportLine::new(LineStyle::Title, "ARQUEO DE CAJA"));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!(
            "ID: {}    Fecha: {}    Turno: {}",
            arqueo.id, record.date, record.shift
        ),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!(
            "Cajero/a: {}    Fondo inicial: {}",
            record.cashier,
            money(record.starting_fund)
        ),
    ));

    // Denomination breakdown, largest face value first. Pairs that do not
    // parse keep their place at the end with a 0.00 subtotal.
    lines.push(ReportLine::new(
        LineStyle::Heading,
        "Desglose de billetes y monedas:",
    ));
    let mut denominations: Vec<(&String, &Value)> = record.counts.iter().collect();
    denominations.sort_by(|(a, _), (b, _)| {
        let a = Decimal::from_str(a.trim()).ok();
        let b = Decimal::from_str(b.trim()).ok();
        b.cmp(&a)
    });
    for (denomination, quantity) in denominations {
        let subtotal = match (
            Decimal::from_str(denomination.trim()),
            crate::calculation::parse_quantity(quantity),
        ) {
            (Ok(d), Some(q)) => d * Decimal::from(q),
            _ => Decimal::ZERO,
        };
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!(
                "{} x {} = {}",
                denomination,
                quantity_text(quantity),
                money(subtotal)
            ),
        ));
    }
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Efectivo (total): {}", money(totals.cash_total)),
    ));
    for (category, amount) in &totals.noncash_totals {
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!("{}: {}", capitalize(category), money(*amount)),
        ));
    }

    if !record.noncash_list.is_empty() {
        lines.push(ReportLine::new(
            LineStyle::Heading,
            "Detalle de entradas no efectivo:",
        ));
        for (tipo, entries) in group_by_tipo(&record.noncash_list) {
            let group_total: Decimal = entries.iter().map(|e| e.monto).sum();
            lines.push(ReportLine::new(
                LineStyle::GroupLabel,
                format!("{}: ${}", capitalize(&tipo), money(group_total)),
            ));
            for entry in entries {
                let text = match &entry.descripcion {
                    Some(descripcion) if !descripcion.is_empty() => {
                        format!("${} - {}", money(entry.monto), descripcion)
                    }
                    _ => format!("${}", money(entry.monto)),
                };
                lines.push(ReportLine::new(LineStyle::Detail, text));
            }
        }
    }

    lines.push(ReportLine::new(LineStyle::Heading, "Facturas al contado:"));
    match &record.fact_contado {
        FactContado::Typed { ranges } => {
            for kind in InvoiceKind::ALL {
                if let Some(range) = ranges.get(&kind) {
                    if range.monto > Decimal::ZERO {
                        lines.push(ReportLine::new(
                            LineStyle::Body,
                            format!(
                                "{}: Desde {} Hasta {} Monto: {}",
                                kind.label(),
                                range.desde,
                                range.hasta,
                                money(range.monto)
                            ),
                        ));
                    }
                }
            }
        }
        FactContado::Legacy { range } => {
            lines.push(ReportLine::new(
                LineStyle::Body,
                format!(
                    "Desde: {}    Hasta: {}    Monto: {}",
                    range.desde,
                    range.hasta,
                    money(range.monto)
                ),
            ));
        }
        FactContado::Absent => {
            lines.push(ReportLine::new(
                LineStyle::Body,
                "Desde:     Hasta:     Monto: 0.00".to_string(),
            ));
        }
    }

    lines.push(ReportLine::new(
        LineStyle::Heading,
        "Facturas a crédito (lista):",
    ));
    for invoice in &record.fact_credito {
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!(
                "Tipo: {}  Nº: {}  Monto: {}",
                invoice.tipo,
                invoice.numero,
                money(invoice.monto)
            ),
        ));
    }

    lines.push(ReportLine::new(LineStyle::Heading, "Resumen:"));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Efectivo: {}", money(totals.cash_total)),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("No Efectivo: {}", money(totals.total_no_efectivo)),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Balance general: {}", money(totals.balance_general)),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!(
            "Total facturado al contado: {}",
            money(totals.total_facturado_al_contado)
        ),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Total facturas crédito: {}", money(totals.credito_total)),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!(
            "Diferencia: {}  ({})",
            money(totals.diferencia),
            totals.outcome()
        ),
    ));
    lines.push(ReportLine::new(
        LineStyle::Footer,
        format!("Generado: {}", arqueo.created_at.to_rfc3339()),
    ));

    ReportDocument {
        filename: format!("arqueo_{}.pdf", arqueo.id),
        lines,
    }
}

/// Groups itemized entries by tipo, preserving first-appearance order.
fn group_by_tipo(entries: &[NonCashEntry]) -> Vec<(String, Vec<&NonCashEntry>)> {
    let mut groups: Vec<(String, Vec<&NonCashEntry>)> = Vec::new();
    for entry in entries {
        let tipo = if entry.tipo.is_empty() {
            "otros".to_string()
        } else {
            entry.tipo.clone()
        };
        match groups.iter_mut().find(|(t, _)| *t == tipo) {
            Some((_, group)) => group.push(entry),
            None => groups.push((tipo, vec![entry])),
        }
    }
    groups
}
