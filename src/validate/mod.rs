//! Validation rule engine — configurable policy checks over a declaration
//!
//! Rules run in a fixed order and are independent of one another, so two
//! calls with the same declaration and configuration always produce the
//! same diagnostics in the same order. Errors flip the result invalid;
//! warnings and suggestions never do.

use crate::declaration::{Declaration, Diagnostic, Severity};
use crate::license::{expression, LicenseTable};
use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

// ─── Rule Configuration ─────────────────────────────────────────────

/// How strictly copyright lines are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyrightFormat {
    /// Only deviations from any accepted phrasing are errors
    Standard,
    /// Deviations are warnings
    Flexible,
    /// No format checking at all
    Any,
}

/// How strictly license identifiers are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseFormat {
    /// Charset violations are errors
    Strict,
    /// Charset violations are warnings
    Flexible,
}

/// Validation rules with their documented defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default = "default_true")]
    pub require_license_identifier: bool,
    #[serde(default = "default_true")]
    pub require_copyright: bool,
    #[serde(default)]
    pub require_project_attribution: bool,
    #[serde(default)]
    pub allow_unknown_licenses: bool,
    #[serde(default)]
    pub require_osi_approved: bool,
    #[serde(default)]
    pub require_spdx_version: bool,
    #[serde(default = "default_min_year")]
    pub min_copyright_year: i32,
    #[serde(default = "default_max_year")]
    pub max_copyright_year: i32,
    #[serde(default = "default_copyright_format")]
    pub copyright_format: CopyrightFormat,
    #[serde(default = "default_license_format")]
    pub license_format: LicenseFormat,
}

fn default_true() -> bool {
    true
}
fn default_min_year() -> i32 {
    1970
}
fn default_max_year() -> i32 {
    current_year() + 1
}
fn default_copyright_format() -> CopyrightFormat {
    CopyrightFormat::Standard
}
fn default_license_format() -> LicenseFormat {
    LicenseFormat::Strict
}

pub(crate) fn current_year() -> i32 {
    chrono::Utc::now().year()
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_license_identifier: true,
            require_copyright: true,
            require_project_attribution: false,
            allow_unknown_licenses: false,
            require_osi_approved: false,
            require_spdx_version: false,
            min_copyright_year: 1970,
            max_copyright_year: current_year() + 1,
            copyright_format: CopyrightFormat::Standard,
            license_format: LicenseFormat::Strict,
        }
    }
}

// ─── Validation Result ──────────────────────────────────────────────

/// Outcome of validating one declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<String>,
    pub elapsed: Duration,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Append an error; the result is invalid from this point on
    pub fn push_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
        self.is_valid = false;
    }

    pub fn push_warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    pub fn push_suggestion(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }

    /// Route a diagnostic by its severity
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.push_error(diagnostic),
            _ => self.push_warning(diagnostic),
        }
    }

    /// Errors and warnings combined, errors first
    pub fn issues(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// JSON rendition for report consumers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Check Patterns ─────────────────────────────────────────────────

static LICENSE_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\s+.()-]+$").unwrap());
static DUP_OPERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(OR\s+OR|AND\s+AND|WITH\s+WITH)").unwrap());
static STANDARD_COPYRIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Copyright\s*\(c\)\s*[0-9,\-\s]+\s+.+$").unwrap());
static FLEXIBLE_COPYRIGHT_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^©\s*[0-9,\-\s]+\s+.+$",
        r"(?i)^Copyright\s+[0-9,\-\s]+\s+.+$",
        r"(?i)^©\s+[0-9,\-\s]+\s+.+$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static VERSION_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^SPDX-[0-9]+\.[0-9]+$").unwrap());
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=]+$").unwrap());

// ─── Rule Engine ────────────────────────────────────────────────────

/// Applies the configured rules to parsed declarations
pub struct RuleEngine {
    rules: ValidationRules,
    table: &'static LicenseTable,
}

impl RuleEngine {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            rules,
            table: LicenseTable::global(),
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Run every check, in fixed order, and collect graded diagnostics.
    pub fn validate(&self, declaration: &Declaration) -> ValidationResult {
        let start = Instant::now();
        let mut result = ValidationResult::new();

        self.check_license(declaration, &mut result);
        self.check_copyright(declaration, &mut result);
        self.check_attribution(declaration, &mut result);
        self.check_version(declaration, &mut result);
        self.check_tags(declaration, &mut result);
        self.check_best_practices(declaration, &mut result);

        result.elapsed = start.elapsed();
        result
    }

    fn check_license(&self, declaration: &Declaration, result: &mut ValidationResult) {
        let Some(raw) = &declaration.license_identifier else {
            if self.rules.require_license_identifier {
                result.push_error(
                    Diagnostic::error("Missing required SPDX license identifier")
                        .with_rule("missing_license_identifier")
                        .with_suggestion(
                            "Add 'SPDX-License-Identifier: [LICENSE-ID]' to your file header",
                        ),
                );
            }
            return;
        };
        let license = raw.trim();

        if !is_valid_license_format(license) {
            let severity = match self.rules.license_format {
                LicenseFormat::Strict => Severity::Error,
                LicenseFormat::Flexible => Severity::Warning,
            };
            result.push(
                Diagnostic::new(
                    severity,
                    format!("Invalid SPDX license identifier format: {license}"),
                )
                .with_rule("invalid_license_format")
                .with_suggestion("Use a valid SPDX license identifier format"),
            );
        }

        if !expression::is_valid(self.table, license) {
            if self.rules.allow_unknown_licenses {
                result.push_warning(
                    Diagnostic::warning(format!(
                        "Unknown or unregistered SPDX license identifier: {license}"
                    ))
                    .with_rule("unknown_license_identifier")
                    .with_suggestion("Consider using a license from the SPDX license list"),
                );
            } else {
                result.push_error(
                    Diagnostic::error(format!("Invalid SPDX license identifier: {license}"))
                        .with_rule("invalid_license_identifier")
                        .with_suggestion(
                            "Use a valid SPDX license identifier from https://spdx.org/licenses/",
                        ),
                );
            }
        }

        if self.rules.require_osi_approved {
            if let Some(info) = expression::get_info(self.table, license) {
                if !info.osi_approved {
                    result.push_warning(
                        Diagnostic::warning(format!("License is not OSI approved: {license}"))
                            .with_rule("non_osi_license")
                            .with_suggestion("Consider using an OSI approved license"),
                    );
                }
            }
        }
    }

    fn check_copyright(&self, declaration: &Declaration, result: &mut ValidationResult) {
        let Some(raw) = &declaration.copyright_text else {
            if self.rules.require_copyright {
                result.push_error(
                    Diagnostic::error("Missing required copyright information")
                        .with_rule("missing_copyright")
                        .with_suggestion(
                            "Add copyright information in format: 'Copyright (c) [year] [holder]'",
                        ),
                );
            }
            return;
        };
        let copyright = raw.trim();

        if self.rules.copyright_format != CopyrightFormat::Any
            && !matches_any_copyright_form(copyright)
        {
            let severity = match self.rules.copyright_format {
                CopyrightFormat::Standard => Severity::Error,
                _ => Severity::Warning,
            };
            result.push(
                Diagnostic::new(severity, format!("Copyright format may be invalid: {copyright}"))
                    .with_rule("invalid_copyright_format")
                    .with_suggestion("Use format: 'Copyright (c) [year] [holder]'"),
            );
        }

        let now = current_year();
        for year in declaration.copyright_years() {
            if year < self.rules.min_copyright_year || year > self.rules.max_copyright_year {
                result.push_warning(
                    Diagnostic::warning(format!("Copyright year {year} seems unusual"))
                        .with_rule("unusual_copyright_year")
                        .with_suggestion(format!(
                            "Copyright year should be between {} and {}",
                            self.rules.min_copyright_year, self.rules.max_copyright_year
                        )),
                );
            } else if year > now {
                result.push_warning(
                    Diagnostic::warning(format!("Copyright year {year} is in the future"))
                        .with_rule("future_copyright_year")
                        .with_suggestion("Copyright year should not be in the future"),
                );
            }
        }
    }

    fn check_attribution(&self, declaration: &Declaration, result: &mut ValidationResult) {
        if self.rules.require_project_attribution && declaration.project_attribution.is_none() {
            result.push_error(
                Diagnostic::error("Missing required project attribution")
                    .with_rule("missing_project_attribution")
                    .with_suggestion("Add project name or attribution information"),
            );
        }

        if let Some(attribution) = &declaration.project_attribution {
            if attribution.trim().len() < 2 {
                result.push_warning(
                    Diagnostic::warning("Project attribution seems too short")
                        .with_rule("short_project_attribution")
                        .with_suggestion("Provide more descriptive project attribution"),
                );
            }
        }
    }

    fn check_version(&self, declaration: &Declaration, result: &mut ValidationResult) {
        if self.rules.require_spdx_version && declaration.spdx_version.is_none() {
            result.push_error(
                Diagnostic::error("Missing required SPDX version")
                    .with_rule("missing_spdx_version")
                    .with_suggestion("Add 'SPDX-Version: [version]' to your file header"),
            );
        }

        if let Some(version) = &declaration.spdx_version {
            let version = version.trim();
            if !VERSION_FORMAT_RE.is_match(version) {
                result.push_warning(
                    Diagnostic::warning(format!("Unusual SPDX version format: {version}"))
                        .with_rule("unusual_spdx_version")
                        .with_suggestion("Use format: 'SPDX-2.2' or similar"),
                );
            }
        }
    }

    fn check_tags(&self, declaration: &Declaration, result: &mut ValidationResult) {
        let tags = &declaration.additional_tags;

        if let Some(contributors) = &tags.contributors {
            if contributors.trim().is_empty() {
                result.push_warning(
                    Diagnostic::warning("Empty contributor information")
                        .with_rule("empty_contributors")
                        .with_suggestion("Remove empty contributor tag or add contributor names"),
                );
            }
        }

        if let Some(location) = &tags.download_location {
            if !URL_RE.is_match(location) {
                result.push_warning(
                    Diagnostic::warning(format!("Invalid download location URL: {location}"))
                        .with_rule("invalid_download_location")
                        .with_suggestion("Use a valid URL for download location"),
                );
            }
        }

        if let Some(homepage) = &tags.homepage {
            if !URL_RE.is_match(homepage) {
                result.push_warning(
                    Diagnostic::warning(format!("Invalid homepage URL: {homepage}"))
                        .with_rule("invalid_homepage")
                        .with_suggestion("Use a valid URL for homepage"),
                );
            }
        }
    }

    fn check_best_practices(&self, declaration: &Declaration, result: &mut ValidationResult) {
        if declaration.license_identifier.is_some() && declaration.copyright_text.is_none() {
            result.push_suggestion(
                "Consider adding copyright information along with license identifier",
            );
        }
        if declaration.copyright_text.is_some() && declaration.license_identifier.is_none() {
            result.push_suggestion(
                "Consider adding license identifier along with copyright information",
            );
        }
        if declaration.spdx_version.is_none() {
            result.push_suggestion("Consider adding SPDX version for clarity");
        }

        if let Some(license) = &declaration.license_identifier {
            if license != license.trim() {
                result.push_warning(
                    Diagnostic::warning("License identifier contains leading/trailing whitespace")
                        .with_rule("license_whitespace")
                        .with_suggestion(
                            "Remove leading/trailing whitespace from license identifier",
                        ),
                );
            }
        }
    }
}

/// Charset, non-blank, and no doubled OR/AND/WITH operators
fn is_valid_license_format(license: &str) -> bool {
    if license.trim().is_empty() {
        return false;
    }
    if !LICENSE_CHARSET_RE.is_match(license) {
        return false;
    }
    !DUP_OPERATOR_RE.is_match(license)
}

/// The standard phrasing or any of the three looser accepted variants
fn matches_any_copyright_form(copyright: &str) -> bool {
    STANDARD_COPYRIGHT_RE.is_match(copyright)
        || FLEXIBLE_COPYRIGHT_RES.iter().any(|p| p.is_match(copyright))
}

// ─── Tests ──────────────────────────────────────────────────────────
