//! Cross-table material lookups: demolition naming and supplier types.

use cl_core::MaterialId;

use crate::{LedgerError, LedgerResult, MaterialRegistry};

// ── NameConversion ────────────────────────────────────────────────────────────

/// Where a construction material lands in the demolition-site taxonomy.
#[derive(Debug, Clone, PartialEq)]
enum DemolitionName {
    /// Present in the demolition stock schema.
    Listed(MaterialId),
    /// Named by the conversion table but not stocked by any demolition site.
    Unlisted,
}

/// Maps construction-site material names onto demolition-site names.
///
/// The two taxonomies are maintained independently, so the mapping is
/// explicit and a missing row is a lookup failure rather than a silent
/// zero.  Several construction materials may map onto one demolition name.
#[derive(Debug, Clone)]
pub struct NameConversion {
    names:   Vec<String>,
    targets: Vec<Option<DemolitionName>>,
}

impl NameConversion {
    /// Build from `(construction_name, demolition_name)` pairs.
    ///
    /// Rows whose construction name is not in `construction` are skipped;
    /// rows whose demolition name is not in `demolition` are kept as
    /// unlisted.
    pub fn new<I>(
        construction: &MaterialRegistry,
        demolition:   &MaterialRegistry,
        pairs:        I,
    ) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut targets = vec![None; construction.len()];
        for (from, to) in pairs {
            let Some(src) = construction.get(&from) else { continue };
            targets[src.index()] = Some(match demolition.get(&to) {
                Some(id) => DemolitionName::Listed(id),
                None => DemolitionName::Unlisted,
            });
        }
        Self {
            names: construction.iter().map(|(_, n)| n.to_owned()).collect(),
            targets,
        }
    }

    /// Demolition-taxonomy id of `material`.
    ///
    /// `Ok(None)` means the demolition schema has no such column, so the
    /// material cannot be reclaimed.
    pub fn convert(&self, material: MaterialId) -> LedgerResult<Option<MaterialId>> {
        match &self.targets[material.index()] {
            Some(DemolitionName::Listed(id)) => Ok(Some(*id)),
            Some(DemolitionName::Unlisted) => Ok(None),
            None => Err(LedgerError::NoConversion(self.names[material.index()].clone())),
        }
    }
}

// ── SupplierTypes ─────────────────────────────────────────────────────────────

/// Which kind of supplier provides each material (e.g. `national`,
/// `international`, or a material-specific plant).
#[derive(Debug, Clone)]
pub struct SupplierTypes {
    names: Vec<String>,
    types: Vec<Option<String>>,
}

impl SupplierTypes {
    /// Build from `(material, supplier_type)` pairs.  Rows naming unknown
    /// materials are skipped.
    pub fn new<I>(registry: &MaterialRegistry, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut types = vec![None; registry.len()];
        for (material, kind) in pairs {
            if let Some(id) = registry.get(&material) {
                types[id.index()] = Some(kind);
            }
        }
        Self {
            names: registry.iter().map(|(_, n)| n.to_owned()).collect(),
            types,
        }
    }

    pub fn supplier_type(&self, material: MaterialId) -> LedgerResult<&str> {
        self.types[material.index()]
            .as_deref()
            .ok_or_else(|| LedgerError::NoSupplierType(self.names[material.index()].clone()))
    }
}
