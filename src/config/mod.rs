use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::ReportKind;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub leads: ReportPaths,
    pub pipeline: ReportPaths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leads: ReportPaths {
                input: PathBuf::from("leads_exemplo.csv"),
                output: PathBuf::from("relatorio_leads.txt"),
            },
            pipeline: ReportPaths {
                input: PathBuf::from("negocios.csv"),
                output: PathBuf::from("relatorio_pipeline.txt"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn paths(&self, kind: ReportKind) -> &ReportPaths {
        match kind {
            ReportKind::Leads => &self.leads,
            ReportKind::Pipeline => &self.pipeline,
        }
    }
}
