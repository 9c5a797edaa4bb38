//! Static destination catalog.
//!
//! Reference data supplied with the application: destination names,
//! countries, and travel-profile scores. The catalog is read-only; the
//! domain only ever looks entries up by name, case-insensitive and
//! trimmed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog destination with its travel-profile scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Destination {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub adventure: f64,
    pub study: f64,
    pub travel: f64,
}

/// In-memory destination catalog loaded from embedded JSON.
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Load the catalog shipped with the binary.
    ///
    /// # Panics
    /// Panics if the embedded JSON is malformed; this is build-time data,
    /// so a failure here is a packaging defect caught at startup.
    pub fn embedded() -> Self {
        let destinations = serde_json::from_str(include_str!("../../data/destinations.json"))
            .expect("embedded destination catalog is valid JSON");
        Self { destinations }
    }

    /// All catalog entries in file order.
    pub fn all(&self) -> &[Destination] {
        &self.destinations
    }

    /// Look up a destination by name, case-insensitive and trimmed.
    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        let target = name.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }
        self.destinations
            .iter()
            .find(|d| d.name.to_lowercase() == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::embedded();
        assert!(!catalog.all().is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let catalog = Catalog::embedded();
        let direct = catalog.find_by_name("Japan").expect("Japan in catalog");
        let fuzzy = catalog.find_by_name("  jApAn ").expect("lookup ignores case/whitespace");
        assert_eq!(direct, fuzzy);
    }

    #[test]
    fn unknown_and_empty_names_miss() {
        let catalog = Catalog::embedded();
        assert!(catalog.find_by_name("Atlantis").is_none());
        assert!(catalog.find_by_name("   ").is_none());
    }
}
