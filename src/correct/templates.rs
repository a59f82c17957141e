//! License header templates per language
//!
//! Placeholders: `{license}`, `{year}`, `{holder}`, `{project}`. Every
//! template ends with a blank line so the generated header separates
//! cleanly from whatever follows.

const HASH_TEMPLATE: &str = "\
# SPDX-License-Identifier: {license}
# Copyright (c) {year} {holder}
# {project}
";

const SLASH_TEMPLATE: &str = "\
// SPDX-License-Identifier: {license}
// Copyright (c) {year} {holder}
// {project}
";

const BLOCK_TEMPLATE: &str = "\
/* SPDX-License-Identifier: {license}
 * Copyright (c) {year} {holder}
 * {project}
 */
";

const MARKUP_TEMPLATE: &str = "\
<!-- SPDX-License-Identifier: {license} -->
<!-- Copyright (c) {year} {holder} -->
<!-- {project} -->
";

const DASH_TEMPLATE: &str = "\
-- SPDX-License-Identifier: {license}
-- Copyright (c) {year} {holder}
-- {project}
";

const BARE_TEMPLATE: &str = "\
SPDX-License-Identifier: {license}
Copyright (c) {year} {holder}
{project}
";

/// Header template for a language id; unknown languages get the bare form.
pub fn template_for(language: &str) -> &'static str {
    match language {
        "python" | "shell" | "ruby" | "perl" | "r" => HASH_TEMPLATE,
        "javascript" | "typescript" | "java" | "go" | "rust" | "swift" | "kotlin" => {
            SLASH_TEMPLATE
        }
        "c" | "cpp" | "css" | "scss" => BLOCK_TEMPLATE,
        "html" | "xml" => MARKUP_TEMPLATE,
        "sql" => DASH_TEMPLATE,
        _ => BARE_TEMPLATE,
    }
}

/// Fill a template's placeholders.
pub fn render(template: &str, license: &str, year: &str, holder: &str, project: &str) -> String {
    template
        .replace("{license}", license)
        .replace("{year}", year)
        .replace("{holder}", holder)
        .replace("{project}", project)
}
