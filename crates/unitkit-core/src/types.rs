//! Parameter addressing and other small shared types.

use std::fmt;

/// Parameter identifier within a unit.
pub type ParameterId = u32;

/// Element (bus, channel, group member) within a scope.
pub type Element = u32;

/// Parameter value as the framework stores it.
pub type ParameterValue = f32;

/// Addressing scope for parameters and properties.
///
/// Kept as a transparent `u32` rather than an enum: the unit, not the
/// wrapper, decides which scopes are legal, so unknown values pass through.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scope(pub u32);

impl Scope {
    /// Settings that apply to the unit as a whole.
    pub const GLOBAL: Self = Self(0);
    /// Input buses.
    pub const INPUT: Self = Self(1);
    /// Output buses.
    pub const OUTPUT: Self = Self(2);
    /// Note groups (MIDI channels on music devices).
    pub const GROUP: Self = Self(3);
    /// Multitimbral parts.
    pub const PART: Self = Self(4);
    /// Individual playing notes.
    pub const NOTE: Self = Self(5);
    /// Layers of a part.
    pub const LAYER: Self = Self(6);
    /// Items within a layer.
    pub const LAYER_ITEM: Self = Self(7);

    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::GLOBAL => write!(f, "global"),
            Self::INPUT => write!(f, "input"),
            Self::OUTPUT => write!(f, "output"),
            Self::GROUP => write!(f, "group"),
            Self::PART => write!(f, "part"),
            Self::NOTE => write!(f, "note"),
            Self::LAYER => write!(f, "layer"),
            Self::LAYER_ITEM => write!(f, "layer item"),
            Self(other) => write!(f, "scope {}", other),
        }
    }
}

/// The (id, scope, element) triple that names one parameter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterAddress {
    pub id: ParameterId,
    pub scope: Scope,
    pub element: Element,
}

impl ParameterAddress {
    pub const fn new(id: ParameterId, scope: Scope, element: Element) -> Self {
        Self { id, scope, element }
    }

    /// Parameter `id` in the global scope, element 0.
    pub const fn global(id: ParameterId) -> Self {
        Self::new(id, Scope::GLOBAL, 0)
    }
}

impl fmt::Display for ParameterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} element {})", self.id, self.scope, self.element)
    }
}

/// View size in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::GLOBAL.to_string(), "global");
        assert_eq!(Scope::LAYER_ITEM.to_string(), "layer item");
        assert_eq!(Scope(42).to_string(), "scope 42");
    }

    #[test]
    fn test_global_address() {
        let addr = ParameterAddress::global(7);
        assert_eq!(addr.scope, Scope::GLOBAL);
        assert_eq!(addr.element, 0);
        assert_eq!(addr.to_string(), "7 (global element 0)");
    }
}
