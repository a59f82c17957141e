//! Declaration parsing — header extraction plus field recovery
//!
//! `HeaderParser` wires the two stages together: isolate the candidate
//! header block for the file's comment syntax, then run the ordered
//! pattern families over it to recover structured SPDX fields.

pub mod fields;
pub mod header;

pub use header::ExtractedHeader;

use crate::declaration::{Declaration, DeclarationType};
use crate::lang;

/// Recognized SPDX tags, matched case-insensitively anywhere on a line
const SPDX_TAGS: &[&str] = &[
    "SPDX-LICENSE-IDENTIFIER:",
    "SPDX-COPYRIGHT:",
    "SPDX-VERSION:",
    "SPDX-PROJECT:",
    "SPDX-CONTRIBUTOR:",
    "SPDX-DOWNLOADLOCATION:",
    "SPDX-HOMEPAGE:",
    "SPDX-FILESANALYZED:",
];

/// Does this line carry any recognized SPDX tag?
pub fn contains_spdx_tag(line: &str) -> bool {
    let upper = line.to_uppercase();
    SPDX_TAGS.iter().any(|tag| upper.contains(tag))
}

/// Does the text carry any recognized SPDX tag besides the version tag?
pub(crate) fn contains_non_version_tag(text: &str) -> bool {
    let upper = text.to_uppercase();
    SPDX_TAGS
        .iter()
        .filter(|tag| **tag != "SPDX-VERSION:")
        .any(|tag| upper.contains(tag))
}

// ─── Parser ─────────────────────────────────────────────────────────

/// Parser for SPDX declarations in source file text
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser;

impl HeaderParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse SPDX information from decoded file text.
    ///
    /// Returns an empty declaration (type [`DeclarationType::None`]) when
    /// no header-like content or no SPDX tag is found. Parse faults never
    /// propagate — they degrade to the empty declaration plus diagnostics.
    pub fn parse(&self, text: &str, language: &str) -> Declaration {
        if text.is_empty() {
            return Declaration::empty();
        }

        let style = lang::style_for(language);
        let shebang = lang::has_shebang(text);

        let Some(extracted) = header::extract(text, style, shebang) else {
            tracing::debug!(language, "no header-like content found");
            return Declaration::empty();
        };

        if !contains_spdx_tag(&extracted.text) {
            return Declaration::empty();
        }

        let mut declaration = fields::extract(&extracted.text);
        declaration.declaration_type = DeclarationType::Header;
        declaration.header_line_range = Some(extracted.line_range);
        declaration.raw_header_text = Some(extracted.text);
        fields::sanity_check(&mut declaration);

        declaration
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
