//! Read-only reference data tables
//!
//! Pre-loaded key-to-label maps consumed while building address labels and
//! resolving cross-reference sources. The tables are loaded once per session
//! by an external collaborator; this module only holds them.

use std::collections::HashMap;

/// Reference data lookup tables.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    postcodes: HashMap<i64, String>,
    post_towns: HashMap<i64, String>,
    sub_localities: HashMap<i64, String>,
    cross_ref_sources: HashMap<i64, String>,
}

impl LookupTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_postcode(&mut self, key: i64, label: impl Into<String>) {
        self.postcodes.insert(key, label.into());
    }

    pub fn insert_post_town(&mut self, key: i64, label: impl Into<String>) {
        self.post_towns.insert(key, label.into());
    }

    pub fn insert_sub_locality(&mut self, key: i64, label: impl Into<String>) {
        self.sub_localities.insert(key, label.into());
    }

    pub fn insert_cross_ref_source(&mut self, key: i64, label: impl Into<String>) {
        self.cross_ref_sources.insert(key, label.into());
    }

    pub fn postcode(&self, key: i64) -> Option<&str> {
        self.postcodes.get(&key).map(String::as_str)
    }

    pub fn post_town(&self, key: i64) -> Option<&str> {
        self.post_towns.get(&key).map(String::as_str)
    }

    pub fn sub_locality(&self, key: i64) -> Option<&str> {
        self.sub_localities.get(&key).map(String::as_str)
    }

    pub fn cross_ref_source(&self, key: i64) -> Option<&str> {
        self.cross_ref_sources.get(&key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_resolution() {
        let mut lookups = LookupTables::new();
        lookups.insert_postcode(1, "AB1 2CD");
        lookups.insert_cross_ref_source(9, "Council Tax");

        assert_eq!(lookups.postcode(1), Some("AB1 2CD"));
        assert_eq!(lookups.postcode(2), None);
        assert_eq!(lookups.cross_ref_source(9), Some("Council Tax"));
    }
}
