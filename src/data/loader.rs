use super::{DataError, DealRecord, LeadRecord, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

pub const LEAD_COLUMNS: [&str; 1] = ["status"];
pub const DEAL_COLUMNS: [&str; 5] = [
    "Oportunidade",
    "Valor_Estimado",
    "Fase",
    "Responsavel",
    "Data_Prevista_Fecho",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderCase {
    Preserve,
    Lower,
}

pub struct DataLoader;

impl DataLoader {
    fn verify_required_columns(headers: &StringRecord, required: &[&str]) -> Result<()> {
        let headers_set: HashSet<_> = headers.iter().collect();

        for column in required {
            if !headers_set.contains(column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    /// Trims (and optionally lowercases) header names. When several headers
    /// normalize to the same name only the first keeps it; later ones are
    /// blanked so the record deserializer ignores them.
    fn normalize_headers(headers: &StringRecord, case: HeaderCase) -> StringRecord {
        let mut seen = HashSet::new();
        headers
            .iter()
            .map(|name| {
                let name = match case {
                    HeaderCase::Preserve => name.trim().to_string(),
                    HeaderCase::Lower => name.trim().to_lowercase(),
                };
                if seen.insert(name.clone()) {
                    name
                } else {
                    tracing::warn!(column = %name, "Duplicate column ignored");
                    String::new()
                }
            })
            .collect()
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }
        Ok(())
    }

    fn open_reader(path: &Path) -> Result<Reader<File>> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        Ok(rdr)
    }

    fn read_records<T: DeserializeOwned>(
        mut rdr: Reader<File>,
        required: &[&str],
        case: HeaderCase,
    ) -> Result<Vec<T>> {
        let headers = Self::normalize_headers(rdr.headers()?, case);
        Self::verify_required_columns(&headers, required)?;
        rdr.set_headers(headers);

        let mut records = Vec::new();
        for result in rdr.deserialize() {
            let record: T = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// Loads a lead export. Header names are matched case-insensitively,
    /// and only `.csv` files are accepted.
    pub fn load_leads<P: AsRef<Path>>(path: P) -> Result<Vec<LeadRecord>> {
        let path = path.as_ref();
        Self::ensure_exists(path)?;
        if !path.to_string_lossy().to_lowercase().ends_with(".csv") {
            return Err(DataError::UnsupportedFormat(path.to_path_buf()));
        }
        let rdr = Self::open_reader(path)?;

        let leads: Vec<LeadRecord> = Self::read_records(rdr, &LEAD_COLUMNS, HeaderCase::Lower)?;
        tracing::info!(path = %path.display(), rows = leads.len(), "Loaded lead export");
        Ok(leads)
    }

    /// Loads a pipeline export. Header names keep their case but are trimmed.
    pub fn load_deals<P: AsRef<Path>>(path: P) -> Result<Vec<DealRecord>> {
        let path = path.as_ref();
        Self::ensure_exists(path)?;
        let rdr = Self::open_reader(path)?;

        let deals: Vec<DealRecord> = Self::read_records(rdr, &DEAL_COLUMNS, HeaderCase::Preserve)?;
        tracing::info!(path = %path.display(), rows = deals.len(), "Loaded pipeline export");
        Ok(deals)
    }
}
