//! Scenario policy options.
//!
//! Each policy is a closed enum with a short code (`as_str`) used in data
//! tables and config files.  Parsing also accepts the long scenario labels
//! shown by the parameter-selection front end, so a config exported from
//! there can be loaded unchanged:
//!
//! | Policy      | Long label                                                      | Code      |
//! |-------------|-----------------------------------------------------------------|-----------|
//! | circularity | `circular non-structural elements`                              | `semi`    |
//! | circularity | `circular non-structural + structural elements`                 | `full`    |
//! | circularity | `circular non-structural + structural + foundation elements`    | `extreme` |
//! | biobased    | `biobased non-structural elements` (…same three steps)          | `semi`…   |
//! | modularity  | `non-structural modules`                                        | `full`    |
//! | any         | `conventional`                                                  | `none`    |

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, StructuralCategory};

/// Generate a policy enum with `as_str`, `Display`, `FromStr`, and (with the
/// `serde` feature) string-based serde impls that go through `FromStr`.
macro_rules! policy_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vattr:meta])* $variant:ident => $code:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $( $(#[$vattr])* $variant ),+
        }

        impl $name {
            /// Short code used in data tables and config files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $code $(| $alias)* => Ok($name::$variant), )+
                    other => Err(CoreError::UnknownOption {
                        kind:  $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

policy_enum! {
    /// How hubs are arranged between suppliers and construction sites.
    pub enum HubTopology: "hub topology" {
        /// Macro hubs only; every site is served by its nearest macro hub.
        Centralized   => "centralized",
        /// Macro and micro hubs; micro hubs forward to their macro hub.
        Decentralized => "decentralized",
        /// No hub tier; suppliers deliver straight to sites.
        Direct        => "none" | "direct",
    }
}

policy_enum! {
    /// Preferred transport network.
    pub enum NetworkType: "network type" {
        Road  => "road",
        Water => "water",
        Rail  => "rail",
    }
}

policy_enum! {
    /// Truck fleet composition.
    pub enum TruckPolicy: "truck policy" {
        Diesel   => "diesel",
        /// Mixed fleet: electric inside the low-emission zone, diesel elsewhere.
        Semi     => "semi",
        Electric => "electric",
    }
}

policy_enum! {
    /// How much of the building uses bio-based materials.  Selects rows of
    /// the material-composition table.
    pub enum BiobasedPolicy: "biobased policy" {
        Conventional => "none" | "conventional",
        Semi         => "semi" | "biobased non-structural elements",
        Full         => "full" | "biobased non-structural + structural elements",
        Extreme      => "extreme" | "biobased non-structural + structural + foundation elements",
    }
}

policy_enum! {
    /// Whether non-structural elements are prefabricated modules.
    pub enum ModularityPolicy: "modularity policy" {
        Conventional => "none" | "conventional",
        Full         => "full" | "non-structural modules",
    }
}

policy_enum! {
    /// How much demand is satisfied from demolition sites.
    pub enum CircularityPolicy: "circularity policy" {
        Conventional => "none" | "conventional",
        Semi         => "semi" | "circular non-structural elements",
        Full         => "full" | "circular non-structural + structural elements",
        Extreme      => "extreme" | "circular non-structural + structural + foundation elements",
    }
}

impl HubTopology {
    /// `true` when the scenario has at least one hub tier.
    #[inline]
    pub fn has_hubs(self) -> bool {
        !matches!(self, HubTopology::Direct)
    }
}

impl ModularityPolicy {
    #[inline]
    pub fn is_modular(self) -> bool {
        matches!(self, ModularityPolicy::Full)
    }
}

impl CircularityPolicy {
    /// Categories sourced from demolition sites under this policy.
    /// Each step adds one category: non-structural, then structural, then
    /// foundation.
    pub fn reclaimed_categories(self) -> &'static [StructuralCategory] {
        use StructuralCategory::*;
        match self {
            CircularityPolicy::Conventional => &[],
            CircularityPolicy::Semi         => &[NonStructural],
            CircularityPolicy::Full         => &[NonStructural, Structural],
            CircularityPolicy::Extreme      => &[NonStructural, Structural, Foundation],
        }
    }

    #[inline]
    pub fn is_circular(self) -> bool {
        !matches!(self, CircularityPolicy::Conventional)
    }
}

// ── PolicyConfig ──────────────────────────────────────────────────────────────

/// The full scenario: one option per policy axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolicyConfig {
    pub hub_topology:       HubTopology,
    pub network_type:       NetworkType,
    pub truck_policy:       TruckPolicy,
    pub biobased_policy:    BiobasedPolicy,
    pub modularity_policy:  ModularityPolicy,
    pub circularity_policy: CircularityPolicy,
}

impl Default for PolicyConfig {
    /// The business-as-usual scenario: centralized hubs, diesel trucks on
    /// the road network, no bio-based, modular, or circular measures.
    fn default() -> Self {
        Self {
            hub_topology:       HubTopology::Centralized,
            network_type:       NetworkType::Road,
            truck_policy:       TruckPolicy::Diesel,
            biobased_policy:    BiobasedPolicy::Conventional,
            modularity_policy:  ModularityPolicy::Conventional,
            circularity_policy: CircularityPolicy::Conventional,
        }
    }
}

impl fmt::Display for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hubs={} network={} trucks={} biobased={} modularity={} circularity={}",
            self.hub_topology,
            self.network_type,
            self.truck_policy,
            self.biobased_policy,
            self.modularity_policy,
            self.circularity_policy,
        )
    }
}
