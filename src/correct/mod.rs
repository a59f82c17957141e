//! Header correction — insert or replace an SPDX header without touching
//! the rest of the file
//!
//! Two paths: insertion (no declaration present) places a generated header
//! after the shebang or before the first non-blank line; replacement
//! (declaration present but invalid) locates the SPDX-tagged lines,
//! expands over the surrounding comment block, and splices a fresh header
//! in its place.
//!
//! Filesystem discipline: dry-run mode never writes anything, and when a
//! backup is requested it is fully written before the original file is
//! overwritten. Failures never escape — they surface as `success = false`
//! plus an error message.

pub mod templates;

use crate::declaration::Declaration;
use crate::lang::{self, CommentStyle};
use crate::parser::contains_spdx_tag;
use crate::validate::current_year;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ─── Settings ───────────────────────────────────────────────────────

/// Correction behavior knobs with their documented defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionSettings {
    #[serde(default = "default_true")]
    pub create_backups: bool,
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
    #[serde(default = "default_license")]
    pub default_license: String,
    #[serde(default = "default_holder")]
    pub default_copyright_holder: String,
    #[serde(default = "default_project")]
    pub default_project_name: String,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_true() -> bool {
    true
}
fn default_backup_suffix() -> String {
    ".spdx-backup".to_string()
}
fn default_license() -> String {
    "MIT".to_string()
}
fn default_holder() -> String {
    "Unknown".to_string()
}
fn default_project() -> String {
    "Unknown Project".to_string()
}

impl Default for CorrectionSettings {
    fn default() -> Self {
        Self {
            create_backups: true,
            backup_suffix: ".spdx-backup".to_string(),
            default_license: "MIT".to_string(),
            default_copyright_holder: "Unknown".to_string(),
            default_project_name: "Unknown Project".to_string(),
            dry_run: false,
        }
    }
}

// ─── Result ─────────────────────────────────────────────────────────

/// Outcome of one correction attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub original_text: String,
    pub corrected_text: String,
    /// Human-readable descriptions of what changed
    pub changes: Vec<String>,
    pub success: bool,
    pub backup_path: Option<PathBuf>,
    pub error_message: Option<String>,
}

impl CorrectionResult {
    fn unchanged(text: &str) -> Self {
        Self {
            original_text: text.to_string(),
            corrected_text: text.to_string(),
            changes: Vec::new(),
            success: false,
            backup_path: None,
            error_message: None,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.original_text != self.corrected_text
    }
}

// ─── Copyright Re-Derivation ────────────────────────────────────────

static FIRST_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());
static YEAR_THEN_HOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\s+(.+)$").unwrap());

// ─── Corrector ──────────────────────────────────────────────────────

/// Computes and applies SPDX header corrections
pub struct Corrector {
    settings: CorrectionSettings,
}

impl Corrector {
    pub fn new(settings: CorrectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CorrectionSettings {
        &self.settings
    }

    /// Compute corrected text without any filesystem access.
    pub fn correct_text(
        &self,
        text: &str,
        declaration: &Declaration,
        language: &str,
    ) -> CorrectionResult {
        let mut result = CorrectionResult::unchanged(text);

        // Already complete and error-free: nothing to do
        if declaration.is_valid() {
            result.success = true;
            result.changes.push("No SPDX correction needed".to_string());
            return result;
        }

        let (corrected, description) = self.generate(text, declaration, language);

        if corrected == text {
            result.success = true;
            result.changes.push("No changes needed".to_string());
            return result;
        }

        result.corrected_text = corrected;
        result.changes.push(description);
        result.success = true;
        result
    }

    /// Apply a correction to a file on disk.
    ///
    /// `text` is the file's already-decoded content. In dry-run mode no
    /// filesystem mutation happens at all; otherwise an optional backup is
    /// written in full before the file is overwritten. Any I/O failure is
    /// reported through the result, never raised.
    pub fn correct_file(
        &self,
        path: &Path,
        text: &str,
        declaration: &Declaration,
        language: &str,
    ) -> CorrectionResult {
        let mut result = self.correct_text(text, declaration, language);

        if !result.success || !result.has_changes() {
            return result;
        }

        if self.settings.dry_run {
            result
                .changes
                .push("Dry run: no files were written".to_string());
            return result;
        }

        if self.settings.create_backups {
            let backup = backup_path_for(path, &self.settings.backup_suffix);
            if let Err(e) = std::fs::copy(path, &backup) {
                result.success = false;
                result.error_message =
                    Some(format!("Failed to create backup {}: {e}", backup.display()));
                return result;
            }
            tracing::info!(backup = %backup.display(), "created backup");
            result.backup_path = Some(backup);
        }

        if let Err(e) = std::fs::write(path, &result.corrected_text) {
            result.success = false;
            result.error_message =
                Some(format!("Failed to write corrected file {}: {e}", path.display()));
            return result;
        }
        tracing::info!(file = %path.display(), "wrote corrected file");
        result
            .changes
            .push("SPDX license header corrected".to_string());
        result
    }

    // ── Header generation ──

    fn generate(&self, text: &str, declaration: &Declaration, language: &str) -> (String, String) {
        let style = lang::style_for(language);
        let lines: Vec<&str> = text.split('\n').collect();
        let header = self.render_header(declaration, language);
        let header_lines: Vec<&str> = header.trim_end().split('\n').chain(Some("")).collect();

        if declaration.has_minimal_info() {
            if let Some((start, end)) = find_header_boundaries(&lines, declaration, style) {
                let mut out: Vec<&str> = Vec::with_capacity(lines.len());
                out.extend_from_slice(&lines[..start]);
                out.extend_from_slice(&header_lines);
                out.extend_from_slice(&lines[end + 1..]);
                return (
                    out.join("\n"),
                    "Replaced existing SPDX license header".to_string(),
                );
            }
            // No recorded header to anchor on: prepend rather than guess
            let mut out = header_lines;
            out.extend_from_slice(&lines);
            return (
                out.join("\n"),
                "Prepended SPDX license header (existing declaration had no known location)"
                    .to_string(),
            );
        }

        let mut out: Vec<&str> = Vec::with_capacity(lines.len() + header_lines.len());
        if lang::has_shebang(text) && !lines.is_empty() {
            out.extend_from_slice(&lines[..1]);
            out.extend_from_slice(&header_lines);
            out.extend_from_slice(&lines[1..]);
        } else {
            // Leading blank lines move after the generated header
            let first_content = lines
                .iter()
                .position(|line| !line.trim().is_empty())
                .unwrap_or(0);
            out.extend_from_slice(&header_lines);
            out.extend_from_slice(&lines[..first_content]);
            out.extend_from_slice(&lines[first_content..]);
        }
        (out.join("\n"), "Inserted new SPDX license header".to_string())
    }

    fn render_header(&self, declaration: &Declaration, language: &str) -> String {
        let (license, copyright, project) = match &declaration.license_identifier {
            Some(license) => (
                license.clone(),
                declaration
                    .copyright_text
                    .clone()
                    .unwrap_or_else(|| self.default_copyright()),
                declaration
                    .project_attribution
                    .clone()
                    .unwrap_or_else(|| self.settings.default_project_name.clone()),
            ),
            None => (
                self.settings.default_license.clone(),
                self.default_copyright(),
                self.settings.default_project_name.clone(),
            ),
        };

        let (year, holder) = self.split_copyright(&copyright);
        templates::render(
            templates::template_for(language),
            &license,
            &year,
            &holder,
            &project,
        )
    }

    fn default_copyright(&self) -> String {
        format!(
            "Copyright (c) {} {}",
            current_year(),
            self.settings.default_copyright_holder
        )
    }

    /// Re-derive (year, holder) from an existing copyright line: first
    /// four-digit year, then the text trailing a year.
    fn split_copyright(&self, copyright: &str) -> (String, String) {
        let year = FIRST_YEAR_RE
            .find(copyright)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| current_year().to_string());

        let holder = YEAR_THEN_HOLDER_RE
            .captures(copyright)
            .and_then(|c| c.get(2))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| self.settings.default_copyright_holder.clone());

        (year, holder)
    }
}

// ─── Placement ──────────────────────────────────────────────────────

/// Locate the full comment block around the recorded SPDX declaration:
/// every SPDX-tagged line, expanded outward while adjacent lines are blank
/// or look like comment continuations.
fn find_header_boundaries(
    lines: &[&str],
    declaration: &Declaration,
    style: &CommentStyle,
) -> Option<(usize, usize)> {
    declaration.raw_header_text.as_ref()?;

    let tagged: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_spdx_tag(line))
        .map(|(i, _)| i)
        .collect();

    let (&first, &last) = (tagged.first()?, tagged.last()?);
    let mut start = first;
    let mut end = last;

    while start > 0 {
        let prev = lines[start - 1].trim();
        if prev.is_empty() || style.is_comment_like(prev) {
            start -= 1;
        } else {
            break;
        }
    }

    while end + 1 < lines.len() {
        let next = lines[end + 1].trim();
        if next.is_empty() || style.is_comment_like(next) {
            end += 1;
        } else {
            break;
        }
    }

    Some((start, end))
}

fn backup_path_for(path: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", path.display(), suffix))
}

// ─── Tests ──────────────────────────────────────────────────────────
