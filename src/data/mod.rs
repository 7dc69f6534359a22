pub mod loader;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use thiserror::Error;

pub const OPEN_PHASES: [&str; 2] = ["Proposta enviada", "A negociar"];
pub const WON_PHASE: &str = "Fechado ganho";
pub const LOST_PHASE: &str = "Fechado perdido";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of a lead export. Only the status column is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeadRecord {
    pub status: Option<String>,
}

/// One row of a pipeline export, with amount and close date already coerced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DealRecord {
    #[serde(rename = "Oportunidade", deserialize_with = "text_or_empty")]
    pub opportunity: String,
    #[serde(rename = "Valor_Estimado", deserialize_with = "coerce_amount")]
    pub amount: f64,
    #[serde(rename = "Fase", deserialize_with = "text_or_empty")]
    pub phase: String,
    #[serde(rename = "Responsavel", deserialize_with = "non_empty")]
    pub responsible: Option<String>,
    #[serde(rename = "Data_Prevista_Fecho", deserialize_with = "coerce_date")]
    pub expected_close: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseClass {
    Open,
    Won,
    Lost,
}

impl PhaseClass {
    /// Unknown phases classify as `None` and stay out of every aggregate.
    pub fn classify(phase: &str) -> Option<Self> {
        match phase {
            p if OPEN_PHASES.contains(&p) => Some(Self::Open),
            WON_PHASE => Some(Self::Won),
            LOST_PHASE => Some(Self::Lost),
            _ => None,
        }
    }
}

impl DealRecord {
    pub fn phase_class(&self) -> Option<PhaseClass> {
        PhaseClass::classify(&self.phase)
    }

    pub fn is_open(&self) -> bool {
        self.phase_class() == Some(PhaseClass::Open)
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Ficheiro não encontrado: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Formato não suportado ({}). Usa .csv", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Coluna obrigatória em falta: {0}")]
    MissingColumn(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Parses a monetary cell; `None` for anything that is not a finite number.
fn try_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn coerce_amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match try_amount(&raw) {
        Some(amount) => Ok(amount),
        None => {
            if !raw.trim().is_empty() {
                tracing::debug!(cell = %raw, "Valor_Estimado is not numeric, using 0");
            }
            Ok(0.0)
        }
    }
}

fn coerce_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let date = parse_date(&raw);
    if date.is_none() && !raw.trim().is_empty() {
        tracing::debug!(cell = %raw, "Data_Prevista_Fecho is not YYYY-MM-DD, treating as missing");
    }
    Ok(date)
}

// Plain `String` fields fail on rows shorter than the header; `Option` reads
// a missing cell as `None`.
fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
