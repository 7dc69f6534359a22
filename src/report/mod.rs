pub mod writer;

use crate::analysis::{LeadSummary, PipelineSummary};
use crate::data::DATE_FORMAT;
use chrono::NaiveDateTime;

pub use writer::ReportWriter;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const LEAD_TITLE: &str = "RELATÓRIO DE LEADS";
pub const PIPELINE_TITLE: &str = "RELATÓRIO DE PIPELINE COMERCIAL";

const LEAD_RULE_WIDTH: usize = 40;
const PIPELINE_RULE_WIDTH: usize = 70;
const EMPTY_STATUS_LABEL: &str = "(sem estado)";

/// Formats an amount as euros with comma thousands separators and two decimals,
/// e.g. `€1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("€{sign}{grouped}.{frac_part}")
}

pub fn render_lead_report(summary: &LeadSummary, now: NaiveDateTime) -> String {
    let mut lines = vec![
        LEAD_TITLE.to_string(),
        format!("Data: {}", now.format(TIMESTAMP_FORMAT)),
        "-".repeat(LEAD_RULE_WIDTH),
        String::new(),
        format!("Total de leads: {}", summary.total),
        String::new(),
        "Leads por estado:".to_string(),
    ];

    for (status, count) in &summary.status_counts {
        let label = status.as_deref().unwrap_or(EMPTY_STATUS_LABEL);
        lines.push(format!("  - {label}: {count}"));
    }

    lines.push(String::new());
    lines.push("Observação rápida:".to_string());
    lines.push(summary.advice().message().to_string());

    lines.join("\n")
}

pub fn render_pipeline_report(summary: &PipelineSummary, now: NaiveDateTime) -> String {
    let mut lines = vec![
        PIPELINE_TITLE.to_string(),
        format!("Data: {}", now.format(TIMESTAMP_FORMAT)),
        "-".repeat(PIPELINE_RULE_WIDTH),
        String::new(),
        format!(
            "Total em aberto (potencial ainda negociável): {}",
            format_currency(summary.total_open)
        ),
        format!(
            "Total ganho (já fechado):                     {}",
            format_currency(summary.total_won)
        ),
        format!(
            "Total perdido:                                 {}",
            format_currency(summary.total_lost)
        ),
        format!(
            "Taxa de sucesso (ganho / ganho+perdido):       {:.1}%",
            summary.success_rate
        ),
        String::new(),
        format!(
            "Maior responsável pelo pipeline em aberto: {} ({} em negociação)",
            summary.top_responsible,
            format_currency(summary.top_value)
        ),
        String::new(),
        "Próximas oportunidades com fecho previsto:".to_string(),
    ];

    if summary.upcoming.is_empty() {
        lines.push("  - (Sem datas previstas nas negociações atuais)".to_string());
    } else {
        for deal in &summary.upcoming {
            let close = deal
                .expected_close
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "data n/d".to_string());
            lines.push(format!(
                "  - {} | {} | {} | Previsto: {}",
                deal.opportunity,
                deal.responsible.as_deref().unwrap_or("n/a"),
                format_currency(deal.amount),
                close
            ));
        }
    }

    lines.push(String::new());
    lines.push("Observação estratégica:".to_string());
    for note in &summary.notes {
        lines.push(format!("- {}", note.message()));
    }

    lines.join("\n")
}
