//! Project configuration — `.spdxguard.toml`
//!
//! Bundles the validation rules and correction settings together with the
//! project identity fields the corrector falls back on. Loading is
//! forgiving: a missing or broken config file logs a warning and falls
//! back to defaults, so one bad file never stops a scan.

use crate::correct::CorrectionSettings;
use crate::license::{expression, LicenseTable};
use crate::validate::ValidationRules;
use crate::{GuardResult, SpdxGuardError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_holder")]
    pub copyright_holder: String,
    #[serde(default = "default_license")]
    pub default_license: String,
    #[serde(default)]
    pub validation: ValidationRules,
    #[serde(default)]
    pub correction: CorrectionSettings,
}

fn default_project_name() -> String {
    "Unknown Project".to_string()
}
fn default_holder() -> String {
    "Unknown".to_string()
}
fn default_license() -> String {
    "MIT".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            copyright_holder: default_holder(),
            default_license: default_license(),
            validation: ValidationRules::default(),
            correction: CorrectionSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> GuardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SpdxGuardError::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Try `.spdxguard.toml` then `spdxguard.toml` in the project root,
    /// falling back to defaults.
    pub fn from_project_root(root: &Path) -> Self {
        for name in [".spdxguard.toml", "spdxguard.toml"] {
            let path = root.join(name);
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "loaded configuration");
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to load configuration, using defaults");
                    }
                }
            }
        }
        Self::default()
    }

    /// Check the configuration for problems a constructor cannot reject.
    /// Returns human-readable messages; empty means clean.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.project_name.trim().is_empty() {
            problems.push("project_name cannot be empty".to_string());
        }
        if self.copyright_holder.trim().is_empty() {
            problems.push("copyright_holder cannot be empty".to_string());
        }
        if self.default_license.trim().is_empty() {
            problems.push("default_license cannot be empty".to_string());
        } else if !expression::is_valid(LicenseTable::global(), &self.default_license) {
            problems.push(format!(
                "default_license '{}' is not a valid SPDX license identifier",
                self.default_license
            ));
        }

        if self.validation.min_copyright_year < 1900 {
            problems.push("min_copyright_year should not be before 1900".to_string());
        }
        if self.validation.min_copyright_year > self.validation.max_copyright_year {
            problems.push("min_copyright_year cannot exceed max_copyright_year".to_string());
        }

        if self.correction.backup_suffix.trim().is_empty() {
            problems.push("backup_suffix cannot be empty".to_string());
        }

        problems
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{CopyrightFormat, LicenseFormat};

    #[test]
    fn test_default_config_is_clean() {
        let config = Config::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.default_license, "MIT");
        assert!(config.validation.require_license_identifier);
        assert!(config.correction.create_backups);
    }

    #[test]
    fn test_toml_parse_full() {
        let toml_str = r#"
            project_name = "Orion"
            copyright_holder = "Orion Authors"
            default_license = "Apache-2.0"

            [validation]
            require_project_attribution = true
            allow_unknown_licenses = true
            min_copyright_year = 2001
            copyright_format = "flexible"
            license_format = "flexible"

            [correction]
            backup_suffix = ".bak"
            dry_run = true
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "Orion");
        assert!(config.validation.require_project_attribution);
        assert!(config.validation.allow_unknown_licenses);
        assert_eq!(config.validation.min_copyright_year, 2001);
        assert_eq!(config.validation.copyright_format, CopyrightFormat::Flexible);
        assert_eq!(config.validation.license_format, LicenseFormat::Flexible);
        assert_eq!(config.correction.backup_suffix, ".bak");
        assert!(config.correction.dry_run);
        // Unspecified fields keep their documented defaults
        assert!(config.validation.require_license_identifier);
        assert!(config.correction.create_backups);
    }

    #[test]
    fn test_validate_flags_problems() {
        let mut config = Config {
            project_name: "  ".into(),
            default_license: "NotALicense".into(),
            ..Config::default()
        };
        config.validation.min_copyright_year = 2050;
        config.validation.max_copyright_year = 2000;
        let problems = config.validate();
        assert!(problems.iter().any(|p| p.contains("project_name")));
        assert!(problems.iter().any(|p| p.contains("default_license")));
        assert!(problems.iter().any(|p| p.contains("max_copyright_year")));
    }

    #[test]
    fn test_from_project_root_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_project_root(dir.path());
        assert_eq!(config.default_license, "MIT");
    }

    #[test]
    fn test_from_project_root_reads_dotfile() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".spdxguard.toml"),
            "default_license = \"BSD-3-Clause\"\n",
        )
        .unwrap();
        let config = Config::from_project_root(dir.path());
        assert_eq!(config.default_license, "BSD-3-Clause");
    }

    #[test]
    fn test_broken_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".spdxguard.toml"), "not valid toml [[[").unwrap();
        let config = Config::from_project_root(dir.path());
        assert_eq!(config.default_license, "MIT");
    }
}
