//! Static routing & assignment table.
//!
//! Resolved once before the first round from the route table's distances
//! and never altered afterwards.  There is no re-routing and no load
//! balancing: every client talks to exactly one hub for the whole run.
//!
//! Candidate order is the order of the `hubs` slice.  The comparison is a
//! strict `<`, so among equal distances the first candidate wins.
//! Candidates with no route row are skipped.

use std::collections::BTreeMap;

use cl_core::EntityId;

use crate::{NetworkError, NetworkResult, RouteClass, RouteTable};

// ── HubTier ───────────────────────────────────────────────────────────────────

/// Tier of a hub.  Only macro hubs source from suppliers and demolition
/// sites; micro hubs aggregate and forward to their macro hub.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HubTier {
    Macro,
    Micro,
}

impl HubTier {
    pub fn as_str(self) -> &'static str {
        match self {
            HubTier::Macro => "macro",
            HubTier::Micro => "micro",
        }
    }
}

impl std::fmt::Display for HubTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Nearest / Assignment ──────────────────────────────────────────────────────

/// A resolved hub together with the route length to it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest {
    pub hub:         EntityId,
    pub distance_km: f64,
}

/// Assignment of one entity.
///
/// | Entity          | `nearest_hub`          | `nearest_macro_hub`      |
/// |-----------------|------------------------|--------------------------|
/// | site            | any active hub         | macro hubs only          |
/// | micro hub       | `None`                 | its macro hub            |
/// | macro hub       | `None`                 | nearest *other* macro    |
/// | demolition site | any active hub         | macro hubs only          |
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    pub nearest_hub:       Option<Nearest>,
    pub nearest_macro_hub: Option<Nearest>,
}

// ── AssignmentTable ───────────────────────────────────────────────────────────

/// Read-only `EntityId → Assignment` map.
#[derive(Debug, Clone, Default)]
pub struct AssignmentTable {
    entries: BTreeMap<EntityId, Assignment>,
}

impl AssignmentTable {
    /// Resolve assignments for every site, hub, and demolition site.
    ///
    /// `hubs` lists the *active* hubs only.  Distances for sites and hubs
    /// come from [`RouteClass::HubClient`] rows (hub → client), distances
    /// for demolition sites from [`RouteClass::DemolitionHub`] rows.
    ///
    /// A site with no reachable macro hub, or a micro hub with no reachable
    /// macro hub, is an error.  A demolition site with no reachable hub is
    /// left unassigned and never collected from.
    pub fn compute(
        hubs:       &[(EntityId, HubTier)],
        sites:      &[EntityId],
        demolition: &[EntityId],
        routes:     &RouteTable,
    ) -> NetworkResult<Self> {
        let all: Vec<EntityId> = hubs.iter().map(|&(h, _)| h).collect();
        let macros: Vec<EntityId> = hubs
            .iter()
            .filter(|&&(_, tier)| tier == HubTier::Macro)
            .map(|&(h, _)| h)
            .collect();

        let mut entries = BTreeMap::new();

        for &site in sites {
            let to_site = |hub| routes.find(RouteClass::HubClient, hub, site);
            let nearest_macro_hub = nearest(&macros, to_site).ok_or(NetworkError::NoCandidate {
                entity: site,
                what:   "macro hub",
            })?;
            entries.insert(site, Assignment {
                nearest_hub:       nearest(&all, to_site),
                nearest_macro_hub: Some(nearest_macro_hub),
            });
        }

        for &(hub, tier) in hubs {
            let assignment = match tier {
                HubTier::Micro => {
                    let found = nearest(&macros, |m| routes.find(RouteClass::HubClient, m, hub))
                        .ok_or(NetworkError::NoCandidate { entity: hub, what: "macro hub" })?;
                    Assignment { nearest_hub: None, nearest_macro_hub: Some(found) }
                }
                HubTier::Macro => {
                    let others: Vec<EntityId> = macros.iter().copied().filter(|&m| m != hub).collect();
                    Assignment {
                        nearest_hub:       None,
                        nearest_macro_hub: nearest(&others, |m| routes.find(RouteClass::HubClient, m, hub)),
                    }
                }
            };
            entries.insert(hub, assignment);
        }

        for &site in demolition {
            let to_hub = |hub| routes.find(RouteClass::DemolitionHub, site, hub);
            entries.insert(site, Assignment {
                nearest_hub:       nearest(&all, to_hub),
                nearest_macro_hub: nearest(&macros, to_hub),
            });
        }

        Ok(Self { entries })
    }

    pub fn get(&self, entity: EntityId) -> Option<&Assignment> {
        self.entries.get(&entity)
    }

    /// The hub that serves `client` under the given topology:
    /// decentralized sites use their nearest hub of any tier, everything
    /// else its nearest macro hub.
    pub fn serving_hub(&self, client: EntityId, decentralized: bool) -> Option<Nearest> {
        let a = self.entries.get(&client)?;
        if decentralized {
            a.nearest_hub.or(a.nearest_macro_hub)
        } else {
            a.nearest_macro_hub
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Assignment)> + '_ {
        self.entries.iter().map(|(&e, a)| (e, a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First candidate with the smallest route distance.
fn nearest<'r, F>(candidates: &[EntityId], mut route_to: F) -> Option<Nearest>
where
    F: FnMut(EntityId) -> Option<&'r crate::Route>,
{
    let mut best: Option<Nearest> = None;
    for &hub in candidates {
        let Some(route) = route_to(hub) else { continue };
        if best.is_none_or(|b| route.distance_km < b.distance_km) {
            best = Some(Nearest { hub, distance_km: route.distance_km });
        }
    }
    best
}
