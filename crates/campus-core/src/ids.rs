//! Strongly typed, zero-cost index wrappers for the road graph.
//!
//! Ids are dense indices assigned by the graph builder in insertion order.
//! They are `Copy + Ord + Hash` so they can be map keys and heap entries.  The
//! inner integer is `pub` for direct indexing into the graph's `Vec`s, but
//! callers should prefer `.index()`.

use std::fmt;

/// Generate a typed id wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid id".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-graph vertex.
    pub struct VertexId(u32);
}

typed_id! {
    /// Index of a directed arc in the graph's CSR arrays.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index into the graph's table of source line-feature identifiers.
    pub struct FeatureId(u32);
}
