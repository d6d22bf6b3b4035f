//! The material key space.

use cl_core::MaterialId;
use rustc_hash::FxHashMap;

use crate::{LedgerError, LedgerResult};

/// Name of the synthetic material standing in for prefabricated
/// non-structural modules.
pub const MODULES: &str = "modules";

/// Bidirectional map between material names and dense `MaterialId`s.
///
/// Ids are assigned in insertion order, so `MaterialId(i)` indexes column
/// `i` of every grid built against this registry.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    names:   Vec<String>,
    by_name: FxHashMap<String, MaterialId>,
}

impl MaterialRegistry {
    /// Build a registry from distinct names.  Duplicates are an error.
    pub fn new<I, S>(names: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reg = Self::default();
        for name in names {
            let name = name.into();
            if reg.by_name.contains_key(&name) {
                return Err(LedgerError::DuplicateMaterial(name));
            }
            reg.insert(name)?;
        }
        Ok(reg)
    }

    /// Return the id of `name`, registering it if it is new.
    pub fn intern(&mut self, name: &str) -> LedgerResult<MaterialId> {
        match self.by_name.get(name) {
            Some(&id) => Ok(id),
            None => self.insert(name.to_owned()),
        }
    }

    fn insert(&mut self, name: String) -> LedgerResult<MaterialId> {
        let id = MaterialId::try_from(self.names.len())
            .map_err(|_| LedgerError::Parse(format!("too many materials at {name:?}")))?;
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    /// Look up `name`; unknown names are a lookup failure.
    pub fn id(&self, name: &str) -> LedgerResult<MaterialId> {
        self.get(name)
            .ok_or_else(|| LedgerError::UnknownMaterial(name.to_owned()))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    /// Name of `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this registry.
    #[inline]
    pub fn name(&self, id: MaterialId) -> &str {
        &self.names[id.index()]
    }

    /// The `modules` material, if registered.
    #[inline]
    pub fn modules(&self) -> Option<MaterialId> {
        self.get(MODULES)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (MaterialId(i as u16), n.as_str()))
    }
}
