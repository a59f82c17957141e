//! Declaration data model — the structured result of parsing SPDX fields
//! out of a file header, plus the diagnostic type shared by the parser and
//! the rule engine.
//!
//! Every value here is created fresh per input file and lives no longer
//! than one parse/validate/correct call; nothing is shared across files.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ─── Declaration Type ───────────────────────────────────────────────

/// Where an SPDX declaration was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationType {
    /// File-leading comment block
    Header,
    /// Inline declaration inside the file body
    Inline,
    /// Declared in a separate file (LICENSE, .spdx)
    Separate,
    /// No declaration found
    None,
}

impl fmt::Display for DeclarationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Inline => write!(f, "inline"),
            Self::Separate => write!(f, "separate"),
            Self::None => write!(f, "none"),
        }
    }
}

// ─── Diagnostics ────────────────────────────────────────────────────

/// Severity of a single diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// A single graded finding about a declaration.
///
/// The message must be non-empty; constructing a diagnostic with an empty
/// message is a programmer error and panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub rule_id: Option<String>,
    pub suggestion: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(!message.is_empty(), "diagnostic message cannot be empty");
        Self {
            severity,
            message,
            rule_id: None,
            suggestion: None,
            line: None,
            column: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule_id {
            Some(rule) => write!(f, "[{}] {} ({})", self.severity, self.message, rule),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

// ─── Auxiliary Tags ─────────────────────────────────────────────────

/// Well-known auxiliary SPDX tags, plus a catch-all for unrecognized keys
/// so forward-compatible headers round-trip without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalTags {
    /// Repeatable `SPDX-Contributor` lines, joined with ", "
    pub contributors: Option<String>,
    /// `SPDX-DownloadLocation`
    pub download_location: Option<String>,
    /// `SPDX-Homepage`
    pub homepage: Option<String>,
    /// `SPDX-FilesAnalyzed`
    pub files_analyzed: Option<String>,
    /// Unrecognized keys, preserved as-is
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl AdditionalTags {
    pub fn is_empty(&self) -> bool {
        self.contributors.is_none()
            && self.download_location.is_none()
            && self.homepage.is_none()
            && self.files_analyzed.is_none()
            && self.extra.is_empty()
    }
}

// ─── Declaration ────────────────────────────────────────────────────

/// Four-digit year anywhere in a copyright string
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());

/// Structured SPDX information recovered from a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Raw license expression string (e.g. "MIT", "MIT OR Apache-2.0")
    pub license_identifier: Option<String>,
    /// Normalized copyright line ("Copyright (c) <years> <holder>")
    pub copyright_text: Option<String>,
    /// Project attribution ("Foo Project", or the name from "Project: Foo")
    pub project_attribution: Option<String>,
    /// SPDX version ("2.3"), explicit or inferred
    pub spdx_version: Option<String>,
    /// Auxiliary tags (contributors, download location, ...)
    pub additional_tags: AdditionalTags,
    /// Where the declaration came from
    pub declaration_type: DeclarationType,
    /// The raw header text the fields were extracted from
    pub raw_header_text: Option<String>,
    /// Zero-based (first, last) line of the header in the original text
    pub header_line_range: Option<(usize, usize)>,
    /// Parse-time diagnostics recorded against this declaration
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            license_identifier: None,
            copyright_text: None,
            project_attribution: None,
            spdx_version: None,
            additional_tags: AdditionalTags::default(),
            declaration_type: DeclarationType::None,
            raw_header_text: None,
            header_line_range: None,
            diagnostics: Vec::new(),
        }
    }
}

impl Declaration {
    /// An empty declaration: nothing found
    pub fn empty() -> Self {
        Self::default()
    }

    /// A license identifier is present and no diagnostic is an Error
    pub fn is_valid(&self) -> bool {
        self.license_identifier.is_some()
            && !self
                .diagnostics
                .iter()
                .any(|d| d.severity == Severity::Error)
    }

    /// The bare minimum is present: a license identifier
    pub fn has_minimal_info(&self) -> bool {
        self.license_identifier.is_some()
    }

    /// All four-digit years found in the copyright text
    pub fn copyright_years(&self) -> Vec<i32> {
        match &self.copyright_text {
            Some(text) => YEAR_RE
                .find_iter(text)
                .filter_map(|m| m.as_str().parse().ok())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// JSON rendition for report consumers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
