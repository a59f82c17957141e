//! # spdxguard — SPDX Declaration Scanning, Validation & Correction Engine
//!
//! Scans source file text for SPDX license/copyright declarations, validates
//! them against format and policy rules, and can automatically insert or
//! repair a compliant header.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       spdxguard                            │
//! │                                                            │
//! │  text + language                                           │
//! │       │                                                    │
//! │  ┌────▼──────────┐   ┌──────────────┐   ┌──────────────┐   │
//! │  │HeaderExtractor│──▶│FieldExtractor│──▶│ Declaration  │   │
//! │  │(comment-aware)│   │(ordered pats)│   │              │   │
//! │  └───────────────┘   └──────────────┘   └──────┬───────┘   │
//! │                                                │           │
//! │        ┌───────────────────────┬───────────────┤           │
//! │  ┌─────▼──────────┐   ┌────────▼───────┐  ┌────▼────────┐  │
//! │  │ Expression     │   │  RuleEngine    │  │  Corrector  │  │
//! │  │ Validator      │   │  (policy)      │  │  (insert /  │  │
//! │  │ (OR/AND/WITH)  │   │                │  │   replace)  │  │
//! │  └────────────────┘   └────────┬───────┘  └────┬────────┘  │
//! │                                │               │           │
//! │                       ValidationResult  CorrectionResult   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capabilities
//!
//! - **Header extraction**: comment-style-aware isolation of the candidate
//!   header block (line comments, block comments, docstrings, markup).
//! - **Field recovery**: ordered pattern families recover license id,
//!   copyright, project attribution, SPDX version, and auxiliary tags from
//!   free text.
//! - **Expression validation**: OR/AND/WITH grammar checked against an
//!   immutable license and exception table.
//! - **Policy rules**: configurable rule engine producing graded
//!   Error/Warning/Info diagnostics plus best-practice suggestions.
//! - **Correction**: safe header insertion or replacement with dry-run and
//!   backup-before-overwrite semantics.
//!
//! Directory traversal, encoding detection, report rendering, VCS
//! integration, and CLI handling are deliberately out of scope — callers
//! feed decoded text plus a language id in, and get structured results back.

pub mod config;
pub mod correct;
pub mod declaration;
pub mod lang;
pub mod license;
pub mod parser;
pub mod validate;

// Re-exports for convenience
pub use config::Config;
pub use correct::{CorrectionResult, CorrectionSettings, Corrector};
pub use declaration::{AdditionalTags, Declaration, DeclarationType, Diagnostic, Severity};
pub use lang::CommentStyle;
pub use license::{LicenseCategory, LicenseEntry, LicenseTable};
pub use parser::HeaderParser;
pub use validate::{RuleEngine, ValidationResult, ValidationRules};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpdxGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Header generation error: {0}")]
    Generation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GuardResult<T> = Result<T, SpdxGuardError>;

/// Parse SPDX declaration fields out of decoded file text.
///
/// Never fails: malformed or absent headers degrade to a [`Declaration`]
/// with [`DeclarationType::None`] (plus recorded diagnostics where a header
/// was found but unusable).
pub fn parse(text: &str, language: &str) -> Declaration {
    HeaderParser::new().parse(text, language)
}

/// Validate a parsed declaration against the default rule set.
pub fn validate(declaration: &Declaration) -> ValidationResult {
    RuleEngine::new(ValidationRules::default()).validate(declaration)
}

/// Compute corrected file text for a declaration, using default settings.
///
/// This is the pure path: no filesystem access regardless of `dry_run`.
/// Use [`Corrector::correct_file`] to apply a correction to a file on disk.
pub fn correct(
    text: &str,
    declaration: &Declaration,
    language: &str,
    dry_run: bool,
) -> CorrectionResult {
    let settings = CorrectionSettings {
        dry_run,
        ..CorrectionSettings::default()
    };
    Corrector::new(settings).correct_text(text, declaration, language)
}
