//! Resolution of host country identifiers to ISO 3166-1 alpha-2 codes.

use std::collections::HashMap;

/// Resolves a host-side country identifier (an ISO code, a display name,
/// or a numeric id) to its two-letter ISO code.
pub trait CountryLookup: Send + Sync {
    fn two_letter_iso(&self, identifier: &str) -> Option<String>;
}

/// Country lookup backed by an alias table.
///
/// Any two-letter alphabetic identifier is accepted as an ISO code as-is.
/// Other identifiers must be registered with [`CountryTable::with_alias`].
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    aliases: HashMap<String, String>,
}

impl CountryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` (matched case-insensitively) as naming `iso_code`.
    #[must_use]
    pub fn with_alias(mut self, alias: &str, iso_code: &str) -> Self {
        self.aliases
            .insert(alias.trim().to_lowercase(), iso_code.to_uppercase());
        self
    }
}

impl CountryLookup for CountryTable {
    fn two_letter_iso(&self, identifier: &str) -> Option<String> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }

        if let Some(code) = self.aliases.get(&identifier.to_lowercase()) {
            return Some(code.clone());
        }

        if identifier.len() == 2 && identifier.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(identifier.to_uppercase());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_codes_are_uppercased() {
        let table = CountryTable::new();
        assert_eq!(table.two_letter_iso("au"), Some("AU".to_string()));
        assert_eq!(table.two_letter_iso(" NZ "), Some("NZ".to_string()));
    }

    #[test]
    fn aliases_resolve_case_insensitively() {
        let table = CountryTable::new()
            .with_alias("Australia", "au")
            .with_alias("13", "AU");
        assert_eq!(table.two_letter_iso("AUSTRALIA"), Some("AU".to_string()));
        assert_eq!(table.two_letter_iso("13"), Some("AU".to_string()));
    }

    #[test]
    fn unknown_identifiers_do_not_resolve() {
        let table = CountryTable::new();
        assert_eq!(table.two_letter_iso("Australia"), None);
        assert_eq!(table.two_letter_iso("A1"), None);
        assert_eq!(table.two_letter_iso(""), None);
    }
}
