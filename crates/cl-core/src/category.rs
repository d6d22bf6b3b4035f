//! Structural categories partitioning material demand.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Which part of a building a material is used in.  Routing policies
/// (circularity, modularity) are expressed per category.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StructuralCategory {
    Foundation,
    Structural,
    NonStructural,
}

impl StructuralCategory {
    /// All categories in canonical order.
    pub const ALL: [StructuralCategory; 3] = [
        StructuralCategory::Foundation,
        StructuralCategory::Structural,
        StructuralCategory::NonStructural,
    ];

    /// Number of categories; the row count of every material grid.
    pub const COUNT: usize = 3;

    /// Dense index in `0..COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            StructuralCategory::Foundation    => 0,
            StructuralCategory::Structural    => 1,
            StructuralCategory::NonStructural => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StructuralCategory::Foundation    => "foundation",
            StructuralCategory::Structural    => "structural",
            StructuralCategory::NonStructural => "non-structural",
        }
    }
}

impl fmt::Display for StructuralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructuralCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "foundation"                        => Ok(StructuralCategory::Foundation),
            "structural"                        => Ok(StructuralCategory::Structural),
            "non-structural" | "non_structural" => Ok(StructuralCategory::NonStructural),
            other => Err(CoreError::UnknownOption {
                kind:  "structural category",
                value: other.to_owned(),
            }),
        }
    }
}
