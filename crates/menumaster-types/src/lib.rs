//! Shared vocabulary for MenuMaster
//!
//! Preferences, the menu photo, the six-section analysis the model returns,
//! and the error taxonomy every front end maps onto its banner.

mod error;
mod types;

pub use error::*;
pub use types::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the CLI prints a finished menu analysis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sectioned text: scan summary, dishes, picks, alerts, notes
    #[default]
    Table,
    /// The `AnalysisResult` as pretty-printed camelCase JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_matches_config_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            output_format: OutputFormat,
        }
        let parsed: Wrapper = toml::from_str("output_format = \"json\"").unwrap();
        assert_eq!(parsed.output_format, OutputFormat::Json);
        assert_eq!(OutputFormat::default().to_string(), "table");
    }
}
