use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub struct ReportWriter;

impl ReportWriter {
    /// Writes the report text as-is, replacing any existing file at `path`.
    /// The handle is closed when it goes out of scope, on success or failure.
    pub fn write<P: AsRef<Path>>(path: P, text: &str) -> io::Result<()> {
        let mut file = File::create(path.as_ref())?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        tracing::info!(path = %path.as_ref().display(), bytes = text.len(), "Report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relatorio.txt");
        fs::write(&path, "conteúdo antigo que é bem mais comprido").unwrap();

        ReportWriter::write(&path, "RELATÓRIO\nnovo").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "RELATÓRIO\nnovo");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nao_existe").join("relatorio.txt");
        assert!(ReportWriter::write(&path, "texto").is_err());
    }
}
