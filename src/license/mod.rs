//! License table and SPDX expression validation
//!
//! Holds the immutable license/exception table every validator shares by
//! reference, and the OR/AND/WITH expression grammar checker built on it.

pub mod expression;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ─── License Categories ─────────────────────────────────────────────

/// Broad license classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseCategory {
    /// MIT, BSD, Apache — few obligations beyond attribution
    Permissive,
    /// GPL — derivative works must carry the same license
    Copyleft,
    /// LGPL, MPL, EPL — obligations limited to modified files
    WeakCopyleft,
    /// CC0, Unlicense — public domain equivalent
    PublicDomain,
    /// Compound OR/AND/WITH expression, not individually classified
    Complex,
}

impl fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => write!(f, "Permissive"),
            Self::Copyleft => write!(f, "Copyleft"),
            Self::WeakCopyleft => write!(f, "Weak Copyleft"),
            Self::PublicDomain => write!(f, "Public Domain"),
            Self::Complex => write!(f, "Complex"),
        }
    }
}

// ─── License Entries ────────────────────────────────────────────────

/// Descriptor for a single known license
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseEntry {
    /// SPDX identifier (e.g. "Apache-2.0")
    pub id: String,
    /// Human-readable name
    pub name: String,
    pub osi_approved: bool,
    pub fsf_libre: bool,
    pub category: LicenseCategory,
}

// ─── License Table ──────────────────────────────────────────────────

/// Immutable license and exception table.
///
/// Built once and shared by reference into every validator; never mutated
/// after construction.
pub struct LicenseTable {
    licenses: BTreeMap<String, LicenseEntry>,
    exceptions: BTreeSet<String>,
}

impl LicenseTable {
    /// Build the table with the core SPDX license list and the recognized
    /// "WITH" exceptions.
    pub fn new() -> Self {
        let mut licenses = BTreeMap::new();
        for (id, name, osi, fsf, category) in CORE_LICENSES {
            licenses.insert(
                (*id).to_string(),
                LicenseEntry {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    osi_approved: *osi,
                    fsf_libre: *fsf,
                    category: *category,
                },
            );
        }
        let exceptions = LICENSE_EXCEPTIONS.iter().map(|e| (*e).to_string()).collect();
        Self {
            licenses,
            exceptions,
        }
    }

    /// Process-wide shared table
    pub fn global() -> &'static LicenseTable {
        static TABLE: Lazy<LicenseTable> = Lazy::new(LicenseTable::new);
        &TABLE
    }

    /// Look up a simple license id (exact, case-sensitive as SPDX ids are)
    pub fn lookup(&self, id: &str) -> Option<&LicenseEntry> {
        self.licenses.get(id)
    }

    pub fn is_known_license(&self, id: &str) -> bool {
        self.licenses.contains_key(id)
    }

    pub fn is_known_exception(&self, id: &str) -> bool {
        self.exceptions.contains(id)
    }

    pub fn licenses(&self) -> impl Iterator<Item = &LicenseEntry> {
        self.licenses.values()
    }

    pub fn exceptions(&self) -> impl Iterator<Item = &str> {
        self.exceptions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }
}

impl Default for LicenseTable {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Core Data ──────────────────────────────────────────────────────

type LicenseRow = (&'static str, &'static str, bool, bool, LicenseCategory);

use LicenseCategory::{Copyleft, Permissive, PublicDomain, WeakCopyleft};

/// The core SPDX licenses recognized for validation
const CORE_LICENSES: &[LicenseRow] = &[
    ("MIT", "MIT License", true, true, Permissive),
    ("Apache-2.0", "Apache License 2.0", true, true, Permissive),
    (
        "GPL-2.0",
        "GNU General Public License v2.0 only",
        true,
        true,
        Copyleft,
    ),
    (
        "GPL-2.0+",
        "GNU General Public License v2.0 or later",
        true,
        true,
        Copyleft,
    ),
    (
        "GPL-3.0",
        "GNU General Public License v3.0 only",
        true,
        true,
        Copyleft,
    ),
    (
        "GPL-3.0+",
        "GNU General Public License v3.0 or later",
        true,
        true,
        Copyleft,
    ),
    (
        "LGPL-2.1",
        "GNU Lesser General Public License v2.1 only",
        true,
        true,
        WeakCopyleft,
    ),
    (
        "LGPL-2.1+",
        "GNU Lesser General Public License v2.1 or later",
        true,
        true,
        WeakCopyleft,
    ),
    (
        "LGPL-3.0",
        "GNU Lesser General Public License v3.0 only",
        true,
        true,
        WeakCopyleft,
    ),
    (
        "LGPL-3.0+",
        "GNU Lesser General Public License v3.0 or later",
        true,
        true,
        WeakCopyleft,
    ),
    ("BSD-2-Clause", "BSD 2-Clause License", true, true, Permissive),
    ("BSD-3-Clause", "BSD 3-Clause License", true, true, Permissive),
    ("MPL-2.0", "Mozilla Public License 2.0", true, true, WeakCopyleft),
    ("EPL-2.0", "Eclipse Public License 2.0", true, true, WeakCopyleft),
    (
        "CC0-1.0",
        "Creative Commons Zero v1.0 Universal",
        false,
        true,
        PublicDomain,
    ),
    ("Unlicense", "The Unlicense", true, true, PublicDomain),
];

/// Recognized license exceptions for `<license> WITH <exception>` expressions
const LICENSE_EXCEPTIONS: &[&str] = &[
    "Classpath-exception-2.0",
    "GPL-CC-1.0",
    "LLVM-exception",
    "Autoconf-exception-3.0",
    "Font-exception-2.0",
    "OCaml-LGPL-linking-exception",
    "Qt-GPL-exception-1.0",
    "Universal-FOSS-exception-1.0",
];

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_major_licenses() {
        let table = LicenseTable::new();
        assert!(table.lookup("MIT").is_some());
        assert!(table.lookup("Apache-2.0").is_some());
        assert!(table.lookup("GPL-3.0").is_some());
        assert!(table.lookup("BSD-3-Clause").is_some());
        assert!(table.lookup("Unlicense").is_some());
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = LicenseTable::new();
        assert!(table.lookup("mit").is_none());
        assert!(table.lookup("MIT ").is_none());
    }

    #[test]
    fn test_osi_flags() {
        let table = LicenseTable::new();
        assert!(table.lookup("MIT").unwrap().osi_approved);
        assert!(!table.lookup("CC0-1.0").unwrap().osi_approved);
        assert!(table.lookup("CC0-1.0").unwrap().fsf_libre);
    }

    #[test]
    fn test_categories() {
        let table = LicenseTable::new();
        assert_eq!(table.lookup("MIT").unwrap().category, Permissive);
        assert_eq!(table.lookup("GPL-2.0").unwrap().category, Copyleft);
        assert_eq!(table.lookup("MPL-2.0").unwrap().category, WeakCopyleft);
        assert_eq!(table.lookup("CC0-1.0").unwrap().category, PublicDomain);
    }

    #[test]
    fn test_exceptions_present() {
        let table = LicenseTable::new();
        assert!(table.is_known_exception("Classpath-exception-2.0"));
        assert!(table.is_known_exception("LLVM-exception"));
        assert!(!table.is_known_exception("Not-An-Exception"));
    }

    #[test]
    fn test_global_table_is_shared() {
        let a = LicenseTable::global();
        let b = LicenseTable::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.len(), 16);
    }
}
