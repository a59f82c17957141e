//! Field recovery — ordered pattern families over the extracted header
//!
//! Each field has its own ordered list of pattern variants, tried in
//! sequence with first-match-wins semantics. Fields are independent: a
//! missing copyright never blocks license extraction and vice versa.

use crate::declaration::{AdditionalTags, Declaration, Diagnostic};
use once_cell::sync::Lazy;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("field pattern must compile"))
        .collect()
}

// ─── Pattern Families ───────────────────────────────────────────────

/// Accepted spellings of the license identifier tag, tightest first.
/// Character classes stay on one line so a capture never swallows the
/// following header line.
static LICENSE_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)SPDX-License-Identifier:[ \t]*([A-Za-z0-9 \t+.()-]+)",
        r"(?i)spdx-license-identifier:[ \t]*([A-Za-z0-9 \t+.()-]+)",
        r"(?i)SPDX-License-Identifier[ \t]*:[ \t]*([A-Za-z0-9 \t+.()-]+)",
    ])
});

/// Accepted copyright phrasings: (c), © after the word, lowercase, bare
/// "Copyright <years> <holder>", bare "© <years> <holder>".
static COPYRIGHT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Copyright[ \t]*\(c\)[ \t]*([0-9,\- \t]+)[ \t]+(.+)",
        r"(?i)Copyright[ \t]*©[ \t]*([0-9,\- \t]+)[ \t]+(.+)",
        r"(?i)copyright[ \t]*\(c\)[ \t]*([0-9,\- \t]+)[ \t]+(.+)",
        r"(?i)Copyright[ \t]+([0-9,\- \t]+)[ \t]+(.+)",
        r"(?i)©[ \t]*([0-9,\- \t]+)[ \t]+(.+)",
    ])
});

/// Project attribution heuristics: "<Name> Project" keeps the word
/// Project; "Project: <Name>" yields the bare name.
static PROJECT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)([A-Za-z0-9 \t_.-]+)[ \t]+Project\b",
        r"(?i)Project:[ \t]*([A-Za-z0-9 \t_.-]+)",
    ])
});

static VERSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)SPDX-Version:[ \t]*([A-Za-z0-9.\-]+)",
        r"(?i)spdx-version:[ \t]*([A-Za-z0-9.\-]+)",
    ])
});

static CONTRIBUTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPDX-Contributor:[ \t]*(.+)").unwrap());
static DOWNLOAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPDX-DownloadLocation:[ \t]*(.+)").unwrap());
static HOMEPAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPDX-Homepage:[ \t]*(.+)").unwrap());
static FILES_ANALYZED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPDX-FilesAnalyzed:[ \t]*(.+)").unwrap());

// Parse-time sanity checks
static LICENSE_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\s+.()-]+$").unwrap());
static STANDARD_COPYRIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Copyright\s*\(c\)\s*[0-9,\-\s]+\s+.+$").unwrap());
static VERSION_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^SPDX-[0-9]+\.[0-9]+$").unwrap());

// ─── Extraction ─────────────────────────────────────────────────────

/// Run every field family over the header text. The resulting declaration
/// has no type or raw-text metadata; the caller fills those in.
pub fn extract(header: &str) -> Declaration {
    Declaration {
        license_identifier: extract_license(header),
        copyright_text: extract_copyright(header),
        project_attribution: extract_project(header),
        spdx_version: extract_version(header),
        additional_tags: extract_tags(header),
        ..Declaration::empty()
    }
}

fn extract_license(header: &str) -> Option<String> {
    for pattern in LICENSE_ID_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(header) {
            let raw = caps.get(1)?.as_str().trim();
            // Markup comment closers are not part of the identifier
            let raw = raw.strip_suffix("--").map(str::trim_end).unwrap_or(raw);
            if !raw.is_empty() {
                return Some(raw.to_string());
            }
        }
    }
    None
}

fn extract_copyright(header: &str) -> Option<String> {
    for pattern in COPYRIGHT_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(header) {
            let years = caps.get(1)?.as_str().trim();
            let holder = caps.get(2)?.as_str().trim();
            return Some(format!("Copyright (c) {years} {holder}"));
        }
    }
    None
}

fn extract_project(header: &str) -> Option<String> {
    if let Some(m) = PROJECT_PATTERNS[0].find(header) {
        return Some(m.as_str().trim().to_string());
    }
    if let Some(caps) = PROJECT_PATTERNS[1].captures(header) {
        return Some(caps.get(1)?.as_str().trim().to_string());
    }
    None
}

fn extract_version(header: &str) -> Option<String> {
    for pattern in VERSION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(header) {
            return Some(caps.get(1)?.as_str().trim().to_string());
        }
    }
    // No explicit tag: the presence of any other SPDX tag implies the
    // current tag vocabulary, so default to 2.3
    if crate::parser::contains_non_version_tag(header) {
        return Some("2.3".to_string());
    }
    None
}

fn extract_tags(header: &str) -> AdditionalTags {
    let contributors: Vec<&str> = CONTRIBUTOR_RE
        .captures_iter(header)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .collect();

    AdditionalTags {
        contributors: if contributors.is_empty() {
            None
        } else {
            Some(contributors.join(", "))
        },
        download_location: first_capture(&DOWNLOAD_RE, header),
        homepage: first_capture(&HOMEPAGE_RE, header),
        files_analyzed: first_capture(&FILES_ANALYZED_RE, header),
        ..AdditionalTags::default()
    }
}

fn first_capture(pattern: &Regex, header: &str) -> Option<String> {
    pattern
        .captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

// ─── Parse-Time Sanity Diagnostics ──────────────────────────────────

/// Record parse-time diagnostics against the declaration. These catch
/// problems visible without any policy: a license identifier with illegal
/// characters, a copyright that lost its shape, an odd version string.
pub fn sanity_check(declaration: &mut Declaration) {
    if let Some(license) = &declaration.license_identifier {
        if !LICENSE_CHARSET_RE.is_match(license) {
            declaration.push_diagnostic(
                Diagnostic::error(format!("Invalid SPDX license identifier: {license}"))
                    .with_rule("invalid_license_id")
                    .with_suggestion(
                        "Use a valid SPDX license identifier from https://spdx.org/licenses/",
                    ),
            );
        }
    }

    if let Some(copyright) = &declaration.copyright_text {
        if !STANDARD_COPYRIGHT_RE.is_match(copyright) {
            declaration.push_diagnostic(
                Diagnostic::warning("Copyright text may not follow standard format")
                    .with_rule("copyright_format_warning")
                    .with_suggestion("Use format: 'Copyright (c) [year] [holder]'"),
            );
        }
    }

    if let Some(version) = &declaration.spdx_version {
        if !VERSION_FORMAT_RE.is_match(version) {
            declaration.push_diagnostic(
                Diagnostic::warning(format!("Unusual SPDX version: {version}"))
                    .with_rule("spdx_version_warning")
                    .with_suggestion("Consider using standard SPDX version format"),
            );
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Severity;

    #[test]
    fn test_license_basic() {
        assert_eq!(
            extract_license("# SPDX-License-Identifier: MIT"),
            Some("MIT".to_string())
        );
    }

    #[test]
    fn test_license_compound_expression() {
        assert_eq!(
            extract_license("// SPDX-License-Identifier: MIT OR Apache-2.0"),
            Some("MIT OR Apache-2.0".to_string())
        );
        assert_eq!(
            extract_license("// SPDX-License-Identifier: (MIT AND BSD-2-Clause)"),
            Some("(MIT AND BSD-2-Clause)".to_string())
        );
    }

    #[test]
    fn test_license_spaced_colon_and_case() {
        assert_eq!(
            extract_license("/* SPDX-License-Identifier : GPL-2.0+ */"),
            Some("GPL-2.0+".to_string())
        );
        assert_eq!(
            extract_license("# spdx-license-identifier: BSD-3-Clause"),
            Some("BSD-3-Clause".to_string())
        );
    }

    #[test]
    fn test_license_markup_closer_stripped() {
        assert_eq!(
            extract_license("<!-- SPDX-License-Identifier: MIT -->"),
            Some("MIT".to_string())
        );
    }

    #[test]
    fn test_license_does_not_swallow_next_line() {
        let header = "# SPDX-License-Identifier: MIT\nApache License text follows";
        assert_eq!(extract_license(header), Some("MIT".to_string()));
    }

    #[test]
    fn test_copyright_variants() {
        let cases = [
            "Copyright (c) 2023 Example Corp",
            "Copyright © 2023 Example Corp",
            "copyright (c) 2023 Example Corp",
            "Copyright 2023 Example Corp",
            "© 2023 Example Corp",
        ];
        for case in cases {
            assert_eq!(
                extract_copyright(case).as_deref(),
                Some("Copyright (c) 2023 Example Corp"),
                "variant: {case}"
            );
        }
    }

    #[test]
    fn test_copyright_year_ranges() {
        assert_eq!(
            extract_copyright("# Copyright (c) 2019-2023, 2025 Acme Inc").as_deref(),
            Some("Copyright (c) 2019-2023, 2025 Acme Inc")
        );
    }

    #[test]
    fn test_project_suffix_form_keeps_the_word() {
        assert_eq!(
            extract_project("# Example Project").as_deref(),
            Some("Example Project")
        );
    }

    #[test]
    fn test_project_prefix_form_yields_bare_name() {
        assert_eq!(
            extract_project("# Project: Orion").as_deref(),
            Some("Orion")
        );
    }

    #[test]
    fn test_version_explicit_beats_inference() {
        let header = "# SPDX-Version: SPDX-2.2\n# SPDX-License-Identifier: MIT";
        assert_eq!(extract_version(header).as_deref(), Some("SPDX-2.2"));
    }

    #[test]
    fn test_version_inferred_from_other_tags() {
        assert_eq!(
            extract_version("# SPDX-License-Identifier: MIT").as_deref(),
            Some("2.3")
        );
        assert_eq!(extract_version("# plain comment"), None);
    }

    #[test]
    fn test_contributors_joined() {
        let header = "# SPDX-Contributor: Ada\n# SPDX-Contributor: Grace\n";
        let tags = extract_tags(header);
        assert_eq!(tags.contributors.as_deref(), Some("Ada, Grace"));
    }

    #[test]
    fn test_single_valued_tags() {
        let header = "\
# SPDX-DownloadLocation: https://example.org/src.tar.gz
# SPDX-Homepage: https://example.org
# SPDX-FilesAnalyzed: true
";
        let tags = extract_tags(header);
        assert_eq!(
            tags.download_location.as_deref(),
            Some("https://example.org/src.tar.gz")
        );
        assert_eq!(tags.homepage.as_deref(), Some("https://example.org"));
        assert_eq!(tags.files_analyzed.as_deref(), Some("true"));
    }

    #[test]
    fn test_fields_are_independent() {
        let decl = extract("# Copyright (c) 2023 Solo Author\n");
        assert!(decl.license_identifier.is_none());
        assert!(decl.copyright_text.is_some());
    }

    #[test]
    fn test_sanity_check_flags_odd_version() {
        let mut decl = extract("# SPDX-License-Identifier: MIT\n");
        sanity_check(&mut decl);
        // Inferred "2.3" lacks the SPDX- prefix, which is worth a warning
        assert!(decl
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning
                && d.rule_id.as_deref() == Some("spdx_version_warning")));
        // but it never invalidates the declaration
        assert!(decl.is_valid());
    }

    #[test]
    fn test_sanity_check_accepts_clean_declaration() {
        let mut decl = extract(
            "# SPDX-License-Identifier: MIT\n# SPDX-Version: SPDX-2.3\n# Copyright (c) 2023 A. Author\n",
        );
        sanity_check(&mut decl);
        assert!(decl.diagnostics.is_empty());
    }
}
