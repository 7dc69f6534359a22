use crate::analysis::{LeadSummary, PipelineSummary};
use crate::data::loader::DataLoader;
use crate::data::DataError;
use crate::report::{self, ReportWriter};
use chrono::NaiveDateTime;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Leads,
    Pipeline,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("Falha ao escrever o relatório: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Loads `input` and renders the report text. Nothing is written.
pub fn build_report<P: AsRef<Path>>(kind: ReportKind, input: P, now: NaiveDateTime) -> Result<String> {
    let text = match kind {
        ReportKind::Leads => {
            let leads = DataLoader::load_leads(input)?;
            let summary = LeadSummary::from_records(&leads);
            tracing::debug!(hot = summary.hot_count, advice = ?summary.advice(), "Lead summary");
            report::render_lead_report(&summary, now)
        }
        ReportKind::Pipeline => {
            let deals = DataLoader::load_deals(input)?;
            let summary = PipelineSummary::from_records(&deals);
            tracing::debug!(
                open = summary.total_open,
                won = summary.total_won,
                lost = summary.total_lost,
                notes = ?summary.notes,
                "Pipeline summary"
            );
            report::render_pipeline_report(&summary, now)
        }
    };
    Ok(text)
}

/// Load, analyze, then write the report to `output`. Returns the report text.
pub fn run_report<P: AsRef<Path>, Q: AsRef<Path>>(
    kind: ReportKind,
    input: P,
    output: Q,
    now: NaiveDateTime,
) -> Result<String> {
    let text = build_report(kind, input, now)?;
    ReportWriter::write(output, &text)?;
    Ok(text)
}
