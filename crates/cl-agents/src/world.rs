//! Entity storage.

use cl_core::{CoreError, EntityId, EntityRng, GeoPoint, HubTopology, ZoneFlags};
use cl_network::{AssignmentTable, NetworkError};

use crate::{
    AgentError, AgentResult, ConstructionSite, DemolitionSite, EntityKind, Hub, ReceivesMaterials,
    RequestsMaterials, Supplier,
};

#[derive(Copy, Clone, Debug)]
struct Slot {
    kind:  EntityKind,
    index: u32,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// All entities of one run, stored per kind, plus an `EntityId` index.
///
/// The per-kind vectors are public so reporting code can scan them
/// directly; lookups by id go through the typed accessors.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub sites:            Vec<ConstructionSite>,
    pub suppliers:        Vec<Supplier>,
    pub hubs:             Vec<Hub>,
    pub demolition_sites: Vec<DemolitionSite>,
    slots:                Vec<Slot>,
}

impl World {
    pub(crate) fn new(
        sites:            Vec<ConstructionSite>,
        suppliers:        Vec<Supplier>,
        hubs:             Vec<Hub>,
        demolition_sites: Vec<DemolitionSite>,
    ) -> Self {
        let mut slots = Vec::with_capacity(sites.len() + suppliers.len() + hubs.len() + demolition_sites.len());
        let mut index = |kind, ids: &mut dyn Iterator<Item = EntityId>| {
            for (i, id) in ids.enumerate() {
                debug_assert_eq!(id.index(), slots.len());
                slots.push(Slot { kind, index: i as u32 });
            }
        };
        index(EntityKind::ConstructionSite, &mut sites.iter().map(|e| e.id));
        index(EntityKind::Supplier, &mut suppliers.iter().map(|e| e.id));
        index(EntityKind::Hub, &mut hubs.iter().map(|e| e.id));
        index(EntityKind::DemolitionSite, &mut demolition_sites.iter().map(|e| e.id));
        Self { sites, suppliers, hubs, demolition_sites, slots }
    }

    /// Total entities, active or not.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, id: EntityId) -> AgentResult<Slot> {
        self.slots
            .get(id.index())
            .copied()
            .ok_or(AgentError::Core(CoreError::EntityNotFound(id)))
    }

    fn slot_of(&self, id: EntityId, expected: EntityKind) -> AgentResult<usize> {
        let slot = self.slot(id)?;
        if slot.kind != expected {
            return Err(AgentError::WrongKind { entity: id, expected });
        }
        Ok(slot.index as usize)
    }

    pub fn kind(&self, id: EntityId) -> AgentResult<EntityKind> {
        Ok(self.slot(id)?.kind)
    }

    // ── Typed access ──────────────────────────────────────────────────────────

    pub fn site(&self, id: EntityId) -> AgentResult<&ConstructionSite> {
        let i = self.slot_of(id, EntityKind::ConstructionSite)?;
        Ok(&self.sites[i])
    }

    pub fn site_mut(&mut self, id: EntityId) -> AgentResult<&mut ConstructionSite> {
        let i = self.slot_of(id, EntityKind::ConstructionSite)?;
        Ok(&mut self.sites[i])
    }

    pub fn hub(&self, id: EntityId) -> AgentResult<&Hub> {
        let i = self.slot_of(id, EntityKind::Hub)?;
        Ok(&self.hubs[i])
    }

    pub fn hub_mut(&mut self, id: EntityId) -> AgentResult<&mut Hub> {
        let i = self.slot_of(id, EntityKind::Hub)?;
        Ok(&mut self.hubs[i])
    }

    pub fn supplier(&self, id: EntityId) -> AgentResult<&Supplier> {
        let i = self.slot_of(id, EntityKind::Supplier)?;
        Ok(&self.suppliers[i])
    }

    pub fn demolition_site(&self, id: EntityId) -> AgentResult<&DemolitionSite> {
        let i = self.slot_of(id, EntityKind::DemolitionSite)?;
        Ok(&self.demolition_sites[i])
    }

    pub fn demolition_site_mut(&mut self, id: EntityId) -> AgentResult<&mut DemolitionSite> {
        let i = self.slot_of(id, EntityKind::DemolitionSite)?;
        Ok(&mut self.demolition_sites[i])
    }

    // ── Any kind ──────────────────────────────────────────────────────────────

    pub fn zone(&self, id: EntityId) -> AgentResult<ZoneFlags> {
        let slot = self.slot(id)?;
        let i = slot.index as usize;
        Ok(match slot.kind {
            EntityKind::ConstructionSite => self.sites[i].zone,
            EntityKind::Supplier         => self.suppliers[i].zone,
            EntityKind::Hub              => self.hubs[i].zone,
            EntityKind::DemolitionSite   => self.demolition_sites[i].zone,
        })
    }

    pub fn location(&self, id: EntityId) -> AgentResult<GeoPoint> {
        let slot = self.slot(id)?;
        let i = slot.index as usize;
        Ok(match slot.kind {
            EntityKind::ConstructionSite => self.sites[i].location,
            EntityKind::Supplier         => self.suppliers[i].location,
            EntityKind::Hub              => self.hubs[i].location,
            EntityKind::DemolitionSite   => self.demolition_sites[i].location,
        })
    }

    /// The requesting side of a hub client (site or micro hub).
    pub fn requester_mut(&mut self, id: EntityId) -> AgentResult<&mut dyn RequestsMaterials> {
        let slot = self.slot(id)?;
        let i = slot.index as usize;
        match slot.kind {
            EntityKind::ConstructionSite => Ok(&mut self.sites[i]),
            EntityKind::Hub              => Ok(&mut self.hubs[i]),
            _ => Err(AgentError::WrongKind { entity: id, expected: EntityKind::ConstructionSite }),
        }
    }

    /// The receiving side of a delivery (site or hub).
    pub fn receiver_mut(&mut self, id: EntityId) -> AgentResult<&mut dyn ReceivesMaterials> {
        let slot = self.slot(id)?;
        let i = slot.index as usize;
        match slot.kind {
            EntityKind::ConstructionSite => Ok(&mut self.sites[i]),
            EntityKind::Hub              => Ok(&mut self.hubs[i]),
            _ => Err(AgentError::NotAReceiver(id)),
        }
    }

    // ── Id lists ──────────────────────────────────────────────────────────────

    pub fn site_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.sites.iter().map(|s| s.id)
    }

    pub fn supplier_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.suppliers.iter().map(|s| s.id)
    }

    pub fn active_hub_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.hubs.iter().filter(|h| h.active).map(|h| h.id)
    }

    pub fn demolition_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.demolition_sites.iter().map(|d| d.id)
    }

    /// Whether every site's ledger is complete.
    pub fn all_sites_complete(&self) -> bool {
        self.sites.iter().all(|s| s.ledger.is_complete())
    }

    // ── Assignment ────────────────────────────────────────────────────────────

    /// Copy assignments onto entities and derive each hub's client list.
    ///
    /// Sites attach to their serving hub (nearest hub of any tier when
    /// decentralized, nearest macro hub otherwise); active micro hubs attach
    /// to their nearest macro hub.  Client lists are in id order.
    pub fn apply_assignment(&mut self, table: &AssignmentTable, topology: HubTopology) -> AgentResult<()> {
        let decentralized = topology == HubTopology::Decentralized;

        for hub in &mut self.hubs {
            hub.clients.clear();
            if let Some(a) = table.get(hub.id) {
                hub.assignment = *a;
            }
        }
        for site in &mut self.demolition_sites {
            if let Some(a) = table.get(site.id) {
                site.assignment = *a;
            }
        }

        let mut links: Vec<(EntityId, EntityId)> = Vec::with_capacity(self.sites.len());
        for site in &mut self.sites {
            if let Some(a) = table.get(site.id) {
                site.assignment = *a;
            }
            let serving = table
                .serving_hub(site.id, decentralized)
                .ok_or(NetworkError::NoCandidate { entity: site.id, what: "hub" })?;
            links.push((serving.hub, site.id));
        }
        for hub in self.hubs.iter().filter(|h| h.active && !h.is_macro()) {
            let serving = hub
                .assignment
                .nearest_macro_hub
                .ok_or(NetworkError::NoCandidate { entity: hub.id, what: "macro hub" })?;
            links.push((serving.hub, hub.id));
        }

        links.sort_unstable_by_key(|&(_, client)| client);
        for (hub, client) in links {
            self.hub_mut(hub)?.clients.push(client);
        }
        Ok(())
    }
}

// ── EntityRngs ────────────────────────────────────────────────────────────────

/// One deterministic RNG per entity, indexed by `EntityId`.
#[derive(Debug)]
pub struct EntityRngs {
    pub inner: Vec<EntityRng>,
}

impl EntityRngs {
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| EntityRng::new(global_seed, EntityId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> &mut EntityRng {
        &mut self.inner[id.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
