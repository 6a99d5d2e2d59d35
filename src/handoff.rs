use crate::models::AcceptedScan;
use crate::utils::AcceptanceError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

impl AcceptedScan {
    /// Writes the accepted scan as JSON for the host that launched the
    /// session. The file appears complete or not at all.
    pub fn write_handoff(&self, path: &Path) -> Result<(), AcceptanceError> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp_file, self)?;
        temp_file.flush()?;
        temp_file
            .persist(path)
            .map_err(|e| AcceptanceError::Handoff(format!("Failed to persist {:?}: {}", path, e)))?;

        Ok(())
    }

    pub fn read_handoff(path: &Path) -> Result<AcceptedScan, AcceptanceError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
