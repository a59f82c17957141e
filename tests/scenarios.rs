//! End-to-end scenarios: parse → validate → correct over realistic file
//! content, including filesystem behavior of the corrector.

use spdxguard::{
    correct, parse, validate, CorrectionSettings, Corrector, Declaration, DeclarationType,
};

// ─── Parse + Validate ───────────────────────────────────────────────

#[test]
fn test_complete_python_header_parses_and_validates() {
    let text = "# SPDX-License-Identifier: MIT\n# Copyright (c) 2023 Example Corp\n# Example Project\n\nprint('hi')";

    let declaration = parse(text, "python");
    assert_eq!(declaration.declaration_type, DeclarationType::Header);
    assert_eq!(declaration.license_identifier.as_deref(), Some("MIT"));
    assert_eq!(
        declaration.copyright_text.as_deref(),
        Some("Copyright (c) 2023 Example Corp")
    );
    assert_eq!(
        declaration.project_attribution.as_deref(),
        Some("Example Project")
    );

    let result = validate(&declaration);
    assert!(result.is_valid);
    assert_eq!(result.errors.len(), 0);
}

#[test]
fn test_bare_file_yields_missing_license_and_copyright() {
    let declaration = parse("print('hi')", "python");
    assert_eq!(declaration.declaration_type, DeclarationType::None);

    let result = validate(&declaration);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 2);

    let missing_license = result
        .errors
        .iter()
        .filter(|e| e.rule_id.as_deref() == Some("missing_license_identifier"))
        .count();
    let missing_copyright = result
        .errors
        .iter()
        .filter(|e| e.rule_id.as_deref() == Some("missing_copyright"))
        .count();
    assert_eq!(missing_license, 1);
    assert_eq!(missing_copyright, 1);
}

#[test]
fn test_validation_is_deterministic_end_to_end() {
    let text = "// SPDX-License-Identifier: WeirdLicense\n// Copyright 1950 Relic Corp\nint x;\n";
    let declaration = parse(text, "c");
    let a = validate(&declaration);
    let b = validate(&declaration);
    assert_eq!(a.is_valid, b.is_valid);
    assert_eq!(a.errors, b.errors);
    assert_eq!(a.warnings, b.warnings);
    assert_eq!(a.suggestions, b.suggestions);
}

// ─── Round-Trip ─────────────────────────────────────────────────────

#[test]
fn test_corrected_text_parses_back_to_same_license() {
    let result = correct("print('hi')", &Declaration::empty(), "python", true);
    assert!(result.success);

    let reparsed = parse(&result.corrected_text, "python");
    assert!(reparsed.has_minimal_info());
    assert_eq!(reparsed.license_identifier.as_deref(), Some("MIT"));
}

#[test]
fn test_round_trip_preserves_existing_license() {
    let text = "// SPDX-License-Identifier: Apache-2.0\n// Copyright (c) 2021 Acme\nfn main() {}\n";
    let mut declaration = parse(text, "rust");
    declaration.push_diagnostic(spdxguard::Diagnostic::error("forced for replacement"));

    let result = correct(text, &declaration, "rust", true);
    assert!(result.success);

    let reparsed = parse(&result.corrected_text, "rust");
    assert_eq!(reparsed.license_identifier.as_deref(), Some("Apache-2.0"));
    assert_eq!(
        reparsed.copyright_text.as_deref(),
        Some("Copyright (c) 2021 Acme")
    );
}

#[test]
fn test_round_trip_across_languages() {
    for language in ["python", "rust", "c", "html", "sql", "shell"] {
        let result = correct("body line\n", &Declaration::empty(), language, true);
        assert!(result.success, "{language}");
        let reparsed = parse(&result.corrected_text, language);
        assert_eq!(
            reparsed.license_identifier.as_deref(),
            Some("MIT"),
            "round-trip failed for {language}: {:?}",
            result.corrected_text
        );
        assert!(reparsed.has_minimal_info());
    }
}

// ─── Filesystem Behavior ────────────────────────────────────────────

#[test]
fn test_correcting_real_file_creates_backup_with_original_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.py");
    let original = "print('hi')";
    std::fs::write(&path, original).unwrap();

    let declaration = parse(original, "python");
    let corrector = Corrector::new(CorrectionSettings::default());
    let result = corrector.correct_file(&path, original, &declaration, "python");

    assert!(result.success, "error: {:?}", result.error_message);
    assert!(result
        .corrected_text
        .starts_with("# SPDX-License-Identifier: MIT"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# SPDX-License-Identifier: MIT"));
    assert!(written.contains("print('hi')"));

    let backup = dir.path().join("script.py.spdx-backup");
    assert!(backup.exists());
    assert_eq!(std::fs::read(&backup).unwrap(), original.as_bytes());
}

#[test]
fn test_valid_file_correction_is_idempotent_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.py");
    let original = "# SPDX-License-Identifier: MIT\n# Copyright (c) 2023 Example Corp\nx = 1\n";
    std::fs::write(&path, original).unwrap();

    let declaration = parse(original, "python");
    assert!(declaration.is_valid());

    let corrector = Corrector::new(CorrectionSettings::default());
    let result = corrector.correct_file(&path, original, &declaration, "python");

    assert!(result.success);
    assert_eq!(result.corrected_text, original);
    assert!(!result.has_changes());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    assert!(!dir.path().join("lib.py.spdx-backup").exists());
}

#[test]
fn test_dry_run_never_touches_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.js");
    let original = "console.log('hi');\n";
    std::fs::write(&path, original).unwrap();

    let settings = CorrectionSettings {
        dry_run: true,
        ..CorrectionSettings::default()
    };
    let declaration = parse(original, "javascript");
    let result = Corrector::new(settings).correct_file(&path, original, &declaration, "javascript");

    assert!(result.success);
    assert!(result.has_changes());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    assert!(!dir.path().join("app.js.spdx-backup").exists());
}

#[test]
fn test_backup_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.go");
    let original = "package main\n";
    std::fs::write(&path, original).unwrap();

    let settings = CorrectionSettings {
        create_backups: false,
        ..CorrectionSettings::default()
    };
    let declaration = parse(original, "go");
    let result = Corrector::new(settings).correct_file(&path, original, &declaration, "go");

    assert!(result.success);
    assert!(result.backup_path.is_none());
    assert!(!dir.path().join("main.go.spdx-backup").exists());
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .starts_with("// SPDX-License-Identifier: MIT"));
}

#[test]
fn test_custom_backup_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.sql");
    let original = "SELECT 1;\n";
    std::fs::write(&path, original).unwrap();

    let settings = CorrectionSettings {
        backup_suffix: ".orig".to_string(),
        ..CorrectionSettings::default()
    };
    let declaration = parse(original, "sql");
    let result = Corrector::new(settings).correct_file(&path, original, &declaration, "sql");

    assert!(result.success);
    assert!(dir.path().join("query.sql.orig").exists());
}

// ─── Shebang Handling ───────────────────────────────────────────────

#[test]
fn test_shebang_stays_on_first_line_after_correction() {
    let original = "#!/usr/bin/env bash\necho hello\n";
    let declaration = parse(original, "shell");
    let result = correct(original, &declaration, "shell", true);

    let lines: Vec<&str> = result.corrected_text.split('\n').collect();
    assert_eq!(lines[0], "#!/usr/bin/env bash");
    assert_eq!(lines[1], "# SPDX-License-Identifier: MIT");

    let reparsed = parse(&result.corrected_text, "shell");
    assert_eq!(reparsed.license_identifier.as_deref(), Some("MIT"));
}
