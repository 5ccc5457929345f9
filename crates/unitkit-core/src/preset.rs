//! Preset identity.
//!
//! A preset is a number and a display name. Factory presets have
//! non-negative numbers; user presets conventionally use negative ones.
//! Two presets are the same preset when their numbers match, whatever their
//! names say.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A named preset as reported by a unit.
#[derive(Debug, Clone)]
pub struct Preset {
    number: i32,
    name: String,
}

impl Preset {
    pub fn new(number: i32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }

    /// Preset number (the identifier the unit uses).
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Factory presets are numbered from zero; user presets are negative.
    pub fn is_factory(&self) -> bool {
        self.number >= 0
    }
}

impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Preset {}

impl Hash for Preset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number, self.name)
    }
}

/// Position of `preset` in `presets`, compared by number.
pub fn index_of(presets: &[Preset], preset: &Preset) -> Option<usize> {
    presets.iter().position(|p| p == preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_name() {
        assert_eq!(Preset::new(3, "Hall"), Preset::new(3, "Renamed"));
        assert_ne!(Preset::new(3, "Hall"), Preset::new(4, "Hall"));

        let set: HashSet<Preset> = [Preset::new(1, "A"), Preset::new(1, "B")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_index_of() {
        let presets = vec![
            Preset::new(0, "Room"),
            Preset::new(1, "Hall"),
            Preset::new(5, "Plate"),
        ];
        assert_eq!(index_of(&presets, &Preset::new(5, "")), Some(2));
        assert_eq!(index_of(&presets, &Preset::new(2, "Hall")), None);
    }

    #[test]
    fn test_factory_flag() {
        assert!(Preset::new(0, "Init").is_factory());
        assert!(!Preset::new(-1, "Mine").is_factory());
        assert_eq!(Preset::new(2, "Plate").to_string(), "2: Plate");
    }
}
