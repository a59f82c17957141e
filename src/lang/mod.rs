//! Comment-style descriptors per language
//!
//! The engine never detects languages itself — callers hand in a language
//! id (from whatever detection they use) and this registry supplies the
//! comment syntax the extractor and corrector need.

use serde::Serialize;

// ─── Comment Styles ─────────────────────────────────────────────────

/// Comment syntax for one family of languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentStyle {
    pub name: &'static str,
    /// Markers that open a comment lasting to end of line ("//", "#")
    pub line_markers: &'static [&'static str],
    /// (open, close) pairs for block comments
    pub block_markers: &'static [(&'static str, &'static str)],
    /// Markers continuing a block comment body (" * " lines)
    pub continuation_markers: &'static [&'static str],
}

impl CommentStyle {
    /// Classify one line given the "inside unterminated block comment"
    /// scan state. Returns (is_comment, next_in_block).
    pub fn classify(&self, line: &str, in_block: bool) -> (bool, bool) {
        let trimmed = line.trim();

        if in_block {
            let closes = self
                .block_markers
                .iter()
                .any(|(_, close)| line.contains(close));
            return (true, !closes);
        }

        if self.line_markers.iter().any(|m| trimmed.starts_with(m)) {
            return (true, false);
        }

        for (open, close) in self.block_markers {
            if let Some(rest) = trimmed.strip_prefix(open) {
                // "/* one-liner */" closes on the same line
                return (true, !rest.contains(close));
            }
        }

        (false, false)
    }

    /// Lexical "looks like part of a comment" check, used when expanding
    /// around an already-located header. Unlike [`classify`] this carries
    /// no scan state, so interior lines of block comments only match via
    /// their continuation markers.
    ///
    /// [`classify`]: CommentStyle::classify
    pub fn is_comment_like(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.line_markers.iter().any(|m| trimmed.starts_with(m))
            || self
                .block_markers
                .iter()
                .any(|(open, close)| trimmed.starts_with(open) || trimmed.starts_with(close))
            || self
                .continuation_markers
                .iter()
                .any(|m| trimmed.starts_with(m))
    }
}

pub const C_STYLE: CommentStyle = CommentStyle {
    name: "c",
    line_markers: &["//"],
    block_markers: &[("/*", "*/")],
    continuation_markers: &["*"],
};

pub const PYTHON_STYLE: CommentStyle = CommentStyle {
    name: "python",
    line_markers: &["#"],
    block_markers: &[("\"\"\"", "\"\"\""), ("'''", "'''")],
    continuation_markers: &[],
};

pub const HASH_STYLE: CommentStyle = CommentStyle {
    name: "hash",
    line_markers: &["#"],
    block_markers: &[],
    continuation_markers: &[],
};

pub const MARKUP_STYLE: CommentStyle = CommentStyle {
    name: "markup",
    line_markers: &[],
    block_markers: &[("<!--", "-->")],
    continuation_markers: &[],
};

pub const DASH_STYLE: CommentStyle = CommentStyle {
    name: "dash",
    line_markers: &["--"],
    block_markers: &[("/*", "*/")],
    continuation_markers: &["*"],
};

// ─── Registry ───────────────────────────────────────────────────────

/// Map a language id to its comment style. Unknown languages fall back to
/// C style, the most common syntax family.
pub fn style_for(language: &str) -> &'static CommentStyle {
    match language {
        "c" | "cpp" | "java" | "javascript" | "typescript" | "go" | "rust" | "swift"
        | "kotlin" | "php" | "css" | "scss" => &C_STYLE,
        "python" => &PYTHON_STYLE,
        "shell" | "ruby" | "perl" | "r" | "sass" => &HASH_STYLE,
        "html" | "xml" => &MARKUP_STYLE,
        "sql" => &DASH_STYLE,
        _ => &C_STYLE,
    }
}

/// Whether the text starts with a shebang line
pub fn has_shebang(text: &str) -> bool {
    text.starts_with("#!")
}

// ─── Tests ──────────────────────────────────────────────────────────
