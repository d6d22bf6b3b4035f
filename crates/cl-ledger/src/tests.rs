//! Unit tests for cl-ledger.

use std::io::Cursor;

use cl_core::{BiobasedPolicy, EntityId, EntityRng, MaterialId, ModularityPolicy, StructuralCategory};

use crate::{
    CompositionTable, MaterialGrid, MaterialLedger, MaterialRegistry, MaterialRequest,
    load_composition_reader,
};

use StructuralCategory::{Foundation, NonStructural, Structural};

// ── Helpers ───────────────────────────────────────────────────────────────────

const COMPOSITION_CSV: &str = "\
building_type,biobased,category,material,tons
A,none,foundation,concrete,500
A,none,structural,concrete,300
A,none,structural,steel,80
A,none,non-structural,timber,60
A,none,non-structural,glass,20
A,none,non-structural,modules,90
A,semi,foundation,concrete,500
A,semi,non-structural,timber,100
B,none,foundation,timber,100
";

fn table() -> (MaterialRegistry, CompositionTable) {
    load_composition_reader(Cursor::new(COMPOSITION_CSV)).unwrap()
}

fn ledger(modularity: ModularityPolicy) -> (MaterialRegistry, MaterialLedger) {
    let (reg, table) = table();
    let l = MaterialLedger::from_composition(&table, &reg, "A", BiobasedPolicy::Conventional, modularity)
        .unwrap();
    (reg, l)
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn ids_in_first_seen_order() {
        let (reg, _) = table();
        let names: Vec<&str> = reg.iter().map(|(_, n)| n).collect();
        assert_eq!(names, ["concrete", "steel", "timber", "glass", "modules"]);
        assert_eq!(reg.id("steel").unwrap(), MaterialId(1));
        assert_eq!(reg.modules(), Some(MaterialId(4)));
    }

    #[test]
    fn duplicate_names_rejected() {
        assert!(MaterialRegistry::new(["timber", "steel", "timber"]).is_err());
    }

    #[test]
    fn unknown_name_is_lookup_failure() {
        let (reg, _) = table();
        assert!(reg.id("asbestos").is_err());
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use super::*;

    #[test]
    fn collapse_drops_category_dimension() {
        let mut g = MaterialGrid::zeros(3);
        g.set(Foundation, MaterialId(0), 10.0);
        g.set(Structural, MaterialId(0), 5.0);
        g.set(NonStructural, MaterialId(2), 7.0);

        let all = g.collapse(&StructuralCategory::ALL);
        assert_eq!(all.get(MaterialId(0)), 15.0);
        assert_eq!(all.get(MaterialId(2)), 7.0);

        let ns = g.collapse(&[NonStructural]);
        let positive: Vec<_> = ns.iter_positive().collect();
        assert_eq!(positive, vec![(MaterialId(2), 7.0)]);
    }

    #[test]
    fn take_zeroes_cell() {
        let mut g = MaterialGrid::zeros(2);
        g.add(Structural, MaterialId(1), 4.0);
        assert_eq!(g.take(Structural, MaterialId(1)), 4.0);
        assert!(g.is_empty());
    }

    #[test]
    fn withdraw_never_goes_negative() {
        use crate::MaterialTotals;
        let mut stock = MaterialTotals::zeros(2);
        stock.set(MaterialId(0), 12.0);
        assert_eq!(stock.withdraw(MaterialId(0), 5.0), 5.0);
        assert_eq!(stock.withdraw(MaterialId(0), 50.0), 7.0);
        assert_eq!(stock.get(MaterialId(0)), 0.0);
        assert_eq!(stock.withdraw(MaterialId(1), 3.0), 0.0);
    }

    #[test]
    fn grid_withdraw_is_capped_per_cell() {
        let mut g = MaterialGrid::zeros(2);
        g.set(Structural, MaterialId(1), 3.0);
        assert_eq!(g.withdraw(Structural, MaterialId(1), 2.0), 2.0);
        assert_eq!(g.withdraw(Structural, MaterialId(1), 2.0), 1.0);
        assert_eq!(g.withdraw(NonStructural, MaterialId(1), 2.0), 0.0);
        assert!(g.is_empty());
    }
}

// ── Ledger construction ───────────────────────────────────────────────────────

#[cfg(test)]
mod ledger_construction {
    use super::*;

    #[test]
    fn conventional_excludes_modules() {
        let (reg, l) = ledger(ModularityPolicy::Conventional);
        let modules = reg.modules().unwrap();
        assert_eq!(l.required().get(NonStructural, modules), 0.0);
        assert_eq!(l.required().get(NonStructural, reg.id("timber").unwrap()), 60.0);
        assert_eq!(l.required().get(Structural, reg.id("concrete").unwrap()), 300.0);
        assert_eq!(l.required().total(), 960.0);
    }

    #[test]
    fn modular_replaces_non_structural_with_modules() {
        let (reg, l) = ledger(ModularityPolicy::Full);
        assert_eq!(l.required().get(NonStructural, reg.modules().unwrap()), 90.0);
        assert_eq!(l.required().get(NonStructural, reg.id("timber").unwrap()), 0.0);
        assert_eq!(l.required().get(NonStructural, reg.id("glass").unwrap()), 0.0);
        assert_eq!(l.required().get(Foundation, reg.id("concrete").unwrap()), 500.0);
    }

    #[test]
    fn biobased_policy_selects_rows() {
        let (reg, table) = table();
        let l = MaterialLedger::from_composition(
            &table, &reg, "A", BiobasedPolicy::Semi, ModularityPolicy::Conventional,
        ).unwrap();
        assert_eq!(l.required().total(), 600.0);
    }

    #[test]
    fn unknown_building_type_is_lookup_failure() {
        let (reg, table) = table();
        let r = MaterialLedger::from_composition(
            &table, &reg, "Z", BiobasedPolicy::Conventional, ModularityPolicy::Conventional,
        );
        assert!(r.is_err());
    }

    #[test]
    fn modular_without_modules_row_is_lookup_failure() {
        let (reg, table) = table();
        let r = MaterialLedger::from_composition(
            &table, &reg, "B", BiobasedPolicy::Conventional, ModularityPolicy::Full,
        );
        assert!(r.is_err());
    }
}

// ── Ledger updates ────────────────────────────────────────────────────────────

#[cfg(test)]
mod ledger_updates {
    use super::*;

    #[test]
    fn outstanding_shrinks_as_deliveries_arrive() {
        let (reg, mut l) = ledger(ModularityPolicy::Conventional);
        assert_eq!(l.outstanding().count(), 5);
        let steel = reg.id("steel").unwrap();
        l.record_delivery(Structural, steel, 80.0);
        assert_eq!(l.outstanding().count(), 4);
        assert!(l.outstanding().all(|(c, m, _)| !(c == Structural && m == steel)));
    }

    #[test]
    fn overshoot_is_recorded_not_clamped() {
        // Deliveries are taken at face value; a caller that over-delivers
        // leaves received > required rather than being silently corrected.
        let (reg, mut l) = ledger(ModularityPolicy::Conventional);
        let glass = reg.id("glass").unwrap();
        l.record_delivery(NonStructural, glass, 25.0);
        assert_eq!(l.received().get(NonStructural, glass), 25.0);
        assert_eq!(l.remaining(NonStructural, glass), -5.0);
        assert!(l.outstanding().all(|(_, m, _)| m != glass));
    }

    #[test]
    fn complete_when_all_received() {
        let (reg, table) = table();
        let mut l = MaterialLedger::from_composition(
            &table, &reg, "B", BiobasedPolicy::Conventional, ModularityPolicy::Conventional,
        ).unwrap();
        assert!(!l.is_complete());
        l.record_delivery(Foundation, reg.id("timber").unwrap(), 100.0);
        assert!(l.is_complete());
        assert_eq!(l.progress(), 1.0);
    }
}

// ── Request protocol ──────────────────────────────────────────────────────────

#[cfg(test)]
mod request {
    use super::*;

    #[test]
    fn request_within_fraction_of_required() {
        let (_, l) = ledger(ModularityPolicy::Conventional);
        let mut rng = EntityRng::new(42, EntityId(0));
        for _ in 0..50 {
            let req = MaterialRequest::draw(&l, &mut rng);
            for (c, m, q) in req.grid().iter_positive() {
                let required = l.required().get(c, m);
                assert!(q >= 0.10 * required - 1e-9, "{q} below 10% of {required}");
                assert!(q < 0.20 * required, "{q} above 20% of {required}");
            }
        }
    }

    #[test]
    fn request_capped_at_remaining() {
        let (reg, mut l) = ledger(ModularityPolicy::Conventional);
        let concrete = reg.id("concrete").unwrap();
        l.record_delivery(Foundation, concrete, 490.0);
        let mut rng = EntityRng::new(1, EntityId(0));
        for _ in 0..20 {
            let req = MaterialRequest::draw(&l, &mut rng);
            assert_eq!(req.get(Foundation, concrete), 10.0);
            for (c, m, q) in req.grid().iter() {
                assert!(q >= 0.0);
                assert!(q <= l.remaining(c, m).max(0.0) + 1e-9);
            }
        }
    }

    #[test]
    fn satisfied_pairs_never_requested() {
        let (reg, mut l) = ledger(ModularityPolicy::Conventional);
        let concrete = reg.id("concrete").unwrap();
        l.record_delivery(Foundation, concrete, 500.0);
        let mut rng = EntityRng::new(3, EntityId(9));
        let req = MaterialRequest::draw(&l, &mut rng);
        assert_eq!(req.get(Foundation, concrete), 0.0);
        // Same material, other category: still requested independently.
        assert!(req.get(Structural, concrete) > 0.0);
    }

    #[test]
    fn take_all_leaves_empty() {
        let (_, l) = ledger(ModularityPolicy::Conventional);
        let mut rng = EntityRng::new(5, EntityId(1));
        let mut req = MaterialRequest::draw(&l, &mut rng);
        let total = req.total();
        let taken = req.take_all();
        assert!(req.is_empty());
        assert_eq!(taken.total(), total);
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog {
    use super::*;
    use crate::{load_name_conversion_reader, load_supplier_types_reader};

    #[test]
    fn conversion_maps_between_taxonomies() {
        let (reg, _) = table();
        let dem = MaterialRegistry::new(["wood", "concrete_rubble"]).unwrap();
        let conv = load_name_conversion_reader(
            Cursor::new("construction_name,demolition_name\ntimber,wood\nconcrete,concrete_rubble\nsteel,scrap\n"),
            &reg,
            &dem,
        ).unwrap();
        assert_eq!(conv.convert(reg.id("timber").unwrap()).unwrap(), Some(MaterialId(0)));
        assert_eq!(conv.convert(reg.id("concrete").unwrap()).unwrap(), Some(MaterialId(1)));
        // Named by the table but absent from the demolition schema.
        assert_eq!(conv.convert(reg.id("steel").unwrap()).unwrap(), None);
        // No row at all.
        assert!(conv.convert(reg.id("glass").unwrap()).is_err());
    }

    #[test]
    fn supplier_type_lookup() {
        let (reg, _) = table();
        let types = load_supplier_types_reader(
            Cursor::new("material,supplier_type\ntimber,international\nconcrete,national\n"),
            &reg,
        ).unwrap();
        assert_eq!(types.supplier_type(reg.id("timber").unwrap()).unwrap(), "international");
        assert!(types.supplier_type(reg.id("glass").unwrap()).is_err());
    }

    #[test]
    fn negative_tonnage_rejected() {
        let csv = "building_type,biobased,category,material,tons\nA,none,foundation,concrete,-1\n";
        assert!(load_composition_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn long_biobased_label_accepted() {
        let csv = "building_type,biobased,category,material,tons\n\
                   A,biobased non-structural elements,foundation,concrete,1\n";
        let (_, table) = load_composition_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.rows()[0].biobased, BiobasedPolicy::Semi);
    }
}
