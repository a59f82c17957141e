//! SPDX license expression grammar validation
//!
//! Checks well-formedness of compound expressions like:
//!   `MIT OR Apache-2.0`
//!   `GPL-3.0 WITH Classpath-exception-2.0`
//!   `(MIT AND BSD-2-Clause) OR Apache-2.0`
//!
//! Precedence, lowest to highest: OR, AND, WITH. Any operand may be wrapped
//! in matching parentheses. This is a structural check against the license
//! table — OR requires ALL operands valid, the same as AND; it does not
//! attempt to pick a satisfying license.

use crate::license::{LicenseCategory, LicenseEntry, LicenseTable};

/// Check whether `expr` is a well-formed license expression over the table.
pub fn is_valid(table: &LicenseTable, expr: &str) -> bool {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return false;
    }

    // Strip exactly one matching outer parenthesis pair and recurse
    if let Some(inner) = strip_outer_parens(trimmed) {
        return is_valid(table, inner);
    }

    // OR binds loosest: every operand must itself be valid
    if let Some(parts) = split_top_level(trimmed, " OR ") {
        return parts.iter().all(|p| is_valid(table, p));
    }

    if let Some(parts) = split_top_level(trimmed, " AND ") {
        return parts.iter().all(|p| is_valid(table, p));
    }

    // WITH requires a known base license and a known exception
    if let Some(parts) = split_top_level(trimmed, " WITH ") {
        if parts.len() != 2 {
            return false;
        }
        return table.is_known_license(parts[0].trim())
            && table.is_known_exception(parts[1].trim());
    }

    table.is_known_license(trimmed)
}

/// Look up descriptor information for an expression.
///
/// Simple ids resolve directly against the table. Compound expressions get
/// a synthetic descriptor: they are never individually OSI-flagged, so
/// `osi_approved` is always false for them.
pub fn get_info(table: &LicenseTable, expr: &str) -> Option<LicenseEntry> {
    let trimmed = expr.trim();

    if [" OR ", " AND ", " WITH "].iter().any(|op| trimmed.contains(op)) {
        return Some(LicenseEntry {
            id: trimmed.to_string(),
            name: format!("Complex License Expression: {trimmed}"),
            osi_approved: false,
            fsf_libre: false,
            category: LicenseCategory::Complex,
        });
    }

    table.lookup(trimmed).cloned()
}

// ─── Expression Structure Helpers ───────────────────────────────────

/// If the expression is wrapped in one matching outer parenthesis pair,
/// return the contents; otherwise None. "(A) OR (B)" is NOT wrapped — the
/// opening parenthesis closes before the end.
fn strip_outer_parens(expr: &str) -> Option<&str> {
    let bytes = expr.as_bytes();
    if bytes.first() != Some(&b'(') || bytes.last() != Some(&b')') {
        return None;
    }

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 && i != bytes.len() - 1 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    Some(&expr[1..expr.len() - 1])
}

/// Split on every occurrence of `op` that sits outside parentheses.
/// Returns None when there is no top-level occurrence at all.
fn split_top_level<'a>(expr: &'a str, op: &str) -> Option<Vec<&'a str>> {
    let bytes = expr.as_bytes();
    let mut depth = 0i32;
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        if depth == 0 && expr[i..].starts_with(op) {
            parts.push(&expr[start..i]);
            i += op.len();
            start = i;
            continue;
        }
        i += 1;
    }

    if parts.is_empty() {
        return None;
    }
    parts.push(&expr[start..]);
    Some(parts)
}

// ─── Tests ──────────────────────────────────────────────────────────
