// ============================================================
// METRICS CONFIGURATION
// ============================================================
// Column and marker conventions the dashboard metrics rely on

use serde::{Deserialize, Serialize};

/// Conventions used when extracting dashboard metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Substring (case-insensitive) anywhere in a row that flags an escape record
    pub escape_marker: String,

    /// Column whose lowercased name contains this keyword holds the nationality
    pub nationality_keyword: String,

    /// Column whose lowercased name contains any of these keywords holds the status
    pub status_keywords: Vec<String>,

    /// Bucket used when the nationality column is missing or blank
    pub unspecified_nationality: String,

    /// Bucket used when the status cell is blank
    pub unknown_status: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            escape_marker: "he has an escape report".to_string(),
            nationality_keyword: "nationality".to_string(),
            status_keywords: vec!["status".to_string(), "card type".to_string()],
            unspecified_nationality: "Unspecified".to_string(),
            unknown_status: "Unknown".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.escape_marker.trim().is_empty() {
            return Err("escape_marker must not be empty".to_string());
        }
        if self.nationality_keyword.trim().is_empty() {
            return Err("nationality_keyword must not be empty".to_string());
        }
        if self.status_keywords.is_empty() {
            return Err("status_keywords must contain at least one keyword".to_string());
        }
        if self.status_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("status_keywords must not contain empty keywords".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MetricsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_marker() {
        let config = MetricsConfig {
            escape_marker: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_status_keyword() {
        let config = MetricsConfig {
            status_keywords: vec!["status".to_string(), String::new()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
