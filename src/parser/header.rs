//! Header extraction — isolate the candidate header block
//!
//! Scans lines in order with a single piece of state (inside an
//! unterminated block comment or not). Two capture modes cooperate:
//!
//! 1. Any line carrying a recognized SPDX tag widens the capture window to
//!    10 lines before and 5 after it — declarations often sit inside a
//!    larger docstring or license boilerplate block, and sometimes deep in
//!    the file body.
//! 2. Otherwise, contiguous comment lines accumulate from the top of the
//!    file and stop at the first non-comment, non-blank line.
//!
//! A hard cap bounds the cost on pathological input; an unterminated block
//! comment is not a fault, extraction simply keeps whatever was captured.

use crate::lang::CommentStyle;
use crate::parser::contains_spdx_tag;
use std::collections::BTreeSet;

/// Upper bound on captured header lines
const MAX_HEADER_LINES: usize = 50;

/// The isolated header block and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedHeader {
    /// Captured lines, joined with newlines, in file order
    pub text: String,
    /// Zero-based (first, last) captured line numbers
    pub line_range: (usize, usize),
}

/// Extract the candidate header from file text, or None when the file has
/// no header-like content at all.
pub fn extract(text: &str, style: &CommentStyle, has_shebang: bool) -> Option<ExtractedHeader> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut captured: BTreeSet<usize> = BTreeSet::new();
    let mut in_block = false;

    for (i, line) in lines.iter().enumerate() {
        if i == 0 && has_shebang {
            continue;
        }

        if in_block {
            captured.insert(i);
            if style.block_markers.iter().any(|(_, close)| line.contains(close)) {
                in_block = false;
            }
            if captured.len() >= MAX_HEADER_LINES {
                break;
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            // Leading and interior blanks neither capture nor terminate
            continue;
        }

        if contains_spdx_tag(line) {
            let start = i.saturating_sub(10);
            let end = (i + 5).min(lines.len());
            for j in start..end {
                captured.insert(j);
            }
            if captured.len() >= MAX_HEADER_LINES {
                break;
            }
            continue;
        }

        let (is_comment, next_in_block) = style.classify(line, false);
        if is_comment {
            captured.insert(i);
            in_block = next_in_block;
        } else if !captured.is_empty() {
            break;
        }

        if captured.len() >= MAX_HEADER_LINES {
            break;
        }
    }

    if captured.is_empty() {
        return None;
    }

    let kept: Vec<usize> = captured.into_iter().take(MAX_HEADER_LINES).collect();
    let first = kept[0];
    let last = kept[kept.len() - 1];
    let text = kept
        .iter()
        .map(|&j| lines[j])
        .collect::<Vec<_>>()
        .join("\n");

    Some(ExtractedHeader {
        text,
        line_range: (first, last),
    })
}

// ─── Tests ──────────────────────────────────────────────────────────
