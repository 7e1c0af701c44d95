//! Allergen Vocabulary
//!
//! The 14 regulated allergens, plus the set type used to tag dishes.
//! Names are kept as the backend stores them; unknown names survive untouched
//! and only lose their icon.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Marker shown for allergen names outside the vocabulary
pub const FALLBACK_MARKER: &str = "⚠️";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Allergen {
    Gluten,
    Dairy,
    Eggs,
    TreeNuts,
    Soy,
    Fish,
    Crustaceans,
    Molluscs,
    Sesame,
    Mustard,
    Celery,
    Peanuts,
    Lupin,
    Sulphites,
}

impl Allergen {
    pub const ALL: [Allergen; 14] = [
        Allergen::Gluten,
        Allergen::Dairy,
        Allergen::Eggs,
        Allergen::TreeNuts,
        Allergen::Soy,
        Allergen::Fish,
        Allergen::Crustaceans,
        Allergen::Molluscs,
        Allergen::Sesame,
        Allergen::Mustard,
        Allergen::Celery,
        Allergen::Peanuts,
        Allergen::Lupin,
        Allergen::Sulphites,
    ];

    /// Name as stored by the backend
    pub fn name(&self) -> &'static str {
        match self {
            Allergen::Gluten => "Gluten",
            Allergen::Dairy => "Lácteos",
            Allergen::Eggs => "Huevos",
            Allergen::TreeNuts => "Frutos secos",
            Allergen::Soy => "Soja",
            Allergen::Fish => "Pescado",
            Allergen::Crustaceans => "Crustáceos",
            Allergen::Molluscs => "Moluscos",
            Allergen::Sesame => "Sésamo",
            Allergen::Mustard => "Mostaza",
            Allergen::Celery => "Apio",
            Allergen::Peanuts => "Cacahuetes",
            Allergen::Lupin => "Altramuces",
            Allergen::Sulphites => "Sulfitos",
        }
    }

    /// Icon asset slug
    pub fn icon(&self) -> &'static str {
        match self {
            Allergen::Gluten => "gluten",
            Allergen::Dairy => "lacteos",
            Allergen::Eggs => "huevos",
            Allergen::TreeNuts => "frutos-cascara",
            Allergen::Soy => "soja",
            Allergen::Fish => "pescado",
            Allergen::Crustaceans => "crustaceos",
            Allergen::Molluscs => "moluscos",
            Allergen::Sesame => "sesamo",
            Allergen::Mustard => "mostaza",
            Allergen::Celery => "apio",
            Allergen::Peanuts => "cacahuetes",
            Allergen::Lupin => "altramuces",
            Allergen::Sulphites => "sulfitos",
        }
    }

    /// Look up a stored name. "Mariscos" is an older spelling of Crustáceos.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == "Mariscos" {
            return Some(Allergen::Crustaceans);
        }
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// What a surface should draw next to an allergen name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllergenMarker {
    Icon(Allergen),
    Fallback,
}

impl AllergenMarker {
    pub fn for_name(name: &str) -> Self {
        Allergen::from_name(name).map_or(AllergenMarker::Fallback, AllergenMarker::Icon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AllergenMarker::Icon(a) => a.icon(),
            AllergenMarker::Fallback => FALLBACK_MARKER,
        }
    }
}

/// Allergen names attached to a dish. Unordered, no duplicates, no blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AllergenSet(BTreeSet<String>);

impl AllergenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the name was blank or already present
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.0.insert(name.to_string())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name.trim())
    }

    /// Add when absent, remove when present. Returns whether it is now present.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.remove(name) {
            false
        } else {
            self.insert(name)
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names outside the vocabulary, preserved as-is
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|n| Allergen::from_name(n).is_none())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllergenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = AllergenSet::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for AllergenSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<AllergenSet> for Vec<String> {
    fn from(set: AllergenSet) -> Self {
        set.0.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_fourteen_distinct_names() {
        let names: BTreeSet<_> = Allergen::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), 14);
        for a in Allergen::ALL {
            assert_eq!(Allergen::from_name(a.name()), Some(a));
        }
    }

    #[test]
    fn test_legacy_alias() {
        assert_eq!(Allergen::from_name("Mariscos"), Some(Allergen::Crustaceans));
    }

    #[test]
    fn test_unknown_name_gets_fallback_marker() {
        assert_eq!(AllergenMarker::for_name("Kiwi"), AllergenMarker::Fallback);
        assert_eq!(AllergenMarker::for_name("Kiwi").as_str(), FALLBACK_MARKER);
        assert_eq!(AllergenMarker::for_name("Lácteos").as_str(), "lacteos");
    }

    #[test]
    fn test_set_dedupes_and_drops_blanks() {
        let set: AllergenSet = ["Gluten", " Gluten ", "", "Soja"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Gluten"));
    }

    #[test]
    fn test_toggle() {
        let mut set = AllergenSet::new();
        assert!(set.toggle("Apio"));
        assert!(!set.toggle("Apio"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_unrecognized_are_preserved() {
        let set: AllergenSet = ["Kiwi", "Gluten"].into_iter().collect();
        assert_eq!(set.unrecognized().collect::<Vec<_>>(), vec!["Kiwi"]);
        assert!(set.contains("Kiwi"));
    }
}
