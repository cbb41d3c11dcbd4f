use crate::types::ValidationReport;
use anyhow::{bail, Result};
use std::path::Path;

/// Output formats accepted by `save_with_format`
pub const OUTPUT_FORMATS: &[&str] = &["json", "compact"];

impl ValidationReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn render(&self, format: &str) -> Result<String> {
        match format {
            "json" => self.to_json_pretty(),
            "compact" => self.to_json_compact(),
            other => bail!("unknown output format '{other}' (expected one of: {})", OUTPUT_FORMATS.join(", ")),
        }
    }

    pub fn save_with_format(&self, path: &Path, format: &str) -> Result<()> {
        let rendered = self.render(format)?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    pub fn load_from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
