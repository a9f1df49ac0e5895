//! Integration tests for assignment, overlap and materia estimation.

use gearplan::catalog::{ItemId, ItemInfo, MateriaInfo, StaticCatalog};
use gearplan::inventory::{InventorySnapshot, InventorySource};
use gearplan::materia::{materia_needed, Confidence, MateriaGroup, RoundingPolicy};
use gearplan::model::{
    CountSelection, Gearpiece, GearpieceSlot, Gearset, GearsetStore, MateriaRequirement,
    PriorityPolicy, RequirementSlot,
};
use gearplan::overlap::detect_overlaps;
use gearplan::solver::{AssignmentSolver, RequirementFilter, RequirementState};

const HEAD: u32 = 10;
const BODY: u32 = 20;
const TWINE: u32 = 21;
const RING: u32 = 30;
const CRIT: u32 = 500;

fn catalog() -> StaticCatalog {
    StaticCatalog::from_items([
        ItemInfo::new(HEAD, "Raid Head"),
        ItemInfo::new(BODY, "Tome Body").with_prerequisites(vec![ItemId::new(TWINE)]),
        ItemInfo::new(TWINE, "Twine"),
        ItemInfo::new(RING, "Crafted Ring").directly_obtainable(),
        ItemInfo::new(CRIT, "Savage Aim Materia XII").with_materia(MateriaInfo {
            stat_type: "Critical Hit".into(),
            grade: 12,
            stat_strength: 54,
            overmeld_chances: vec![],
        }),
    ])
}

fn savage() -> Gearset {
    Gearset::new(
        "Savage",
        vec![
            Gearpiece::new(GearpieceSlot::Head, HEAD)
                .with_materia(MateriaRequirement::new(CRIT))
                .with_materia(MateriaRequirement::new(CRIT).with_chance(70.0)),
            Gearpiece::new(GearpieceSlot::Body, BODY).with_prerequisites([ItemId::new(TWINE)]),
            Gearpiece::new(GearpieceSlot::FingerLeft, RING),
        ],
    )
}

fn alt() -> Gearset {
    Gearset::new(
        "Alt",
        vec![
            Gearpiece::new(GearpieceSlot::Head, HEAD),
            Gearpiece::new(GearpieceSlot::Body, BODY).with_prerequisites([ItemId::new(TWINE)]),
        ],
    )
}

fn state_of(
    resolution: &gearplan::solver::Resolution,
    store: &GearsetStore,
    gearset: usize,
    slot: GearpieceSlot,
) -> Option<RequirementState> {
    let piece = store.ordered()[gearset]
        .gearpieces
        .iter()
        .find(|gp| gp.slot == slot)?
        .id();
    resolution.gearpiece_state(piece)
}

#[test]
fn end_to_end_scenario() {
    let catalog = catalog();
    let store = GearsetStore::from_gearsets(vec![savage(), alt()]).unwrap();
    let inventory = InventorySnapshot::new()
        .with(HEAD, 1)
        .with(TWINE, 1)
        .with(CRIT, 1);

    let resolution = AssignmentSolver::new(&catalog).solve(&store, &inventory);

    // first gearset takes the head and the twine
    assert_eq!(
        state_of(&resolution, &store, 0, GearpieceSlot::Head),
        Some(RequirementState::Collected)
    );
    assert_eq!(
        state_of(&resolution, &store, 0, GearpieceSlot::Body),
        Some(RequirementState::ObtainableFull)
    );
    assert_eq!(
        state_of(&resolution, &store, 0, GearpieceSlot::FingerLeft),
        Some(RequirementState::ObtainableFull)
    );
    assert_eq!(
        state_of(&resolution, &store, 1, GearpieceSlot::Head),
        Some(RequirementState::NotObtainable)
    );
    assert_eq!(
        state_of(&resolution, &store, 1, GearpieceSlot::Body),
        Some(RequirementState::NotObtainable)
    );

    let head = store.ordered()[0].gearpieces[0].id();
    assert_eq!(
        resolution.state(head, RequirementSlot::Materia(0)),
        Some(RequirementState::Collected)
    );
    assert_eq!(
        resolution.state(head, RequirementSlot::Materia(1)),
        Some(RequirementState::NotObtainable)
    );

    let progress = resolution.gearset_progress();
    assert_eq!(progress.len(), 2);
    assert_eq!((progress[0].collected, progress[0].total), (1, 3));
    assert!(resolution.unknown_items().is_empty());
}

#[test]
fn solving_is_deterministic() {
    let catalog = catalog();
    let store = GearsetStore::from_gearsets(vec![savage(), alt()]).unwrap();
    let inventory = InventorySnapshot::new().with(HEAD, 1).with(CRIT, 3);
    let solver = AssignmentSolver::new(&catalog);

    let first = solver.solve(&store, &inventory);
    for _ in 0..5 {
        assert_eq!(solver.solve(&store, &inventory), first);
    }
}

#[test]
fn claims_never_exceed_owned() {
    let catalog = catalog();
    let store = GearsetStore::from_gearsets(vec![savage(), alt(), savage()]).unwrap();
    let inventory = InventorySnapshot::new()
        .with(HEAD, 2)
        .with(TWINE, 1)
        .with(CRIT, 3);

    let resolution = AssignmentSolver::new(&catalog).solve(&store, &inventory);

    for (item, claimed) in resolution.ledger().claims() {
        assert!(claimed <= inventory.owned_quantity(item), "over-claimed {}", item);
    }
    assert_eq!(resolution.ledger().claimed(ItemId::new(HEAD)), 2);
    assert_eq!(resolution.ledger().claimed(ItemId::new(CRIT)), 3);
    assert_eq!(resolution.ledger().unclaimed(ItemId::new(CRIT)), 0);
}

#[test]
fn priority_policy_decides_contested_items() {
    let catalog = catalog();
    let mut store = GearsetStore::from_gearsets(vec![
        Gearset::new("Zeta", vec![Gearpiece::new(GearpieceSlot::Head, HEAD)]).with_job(19),
        Gearset::new("alpha", vec![Gearpiece::new(GearpieceSlot::Head, HEAD)]).with_job(40),
    ])
    .unwrap();
    let inventory = InventorySnapshot::new().with(HEAD, 1);
    let solver = AssignmentSolver::new(&catalog);
    let zeta = store.find_by_name("zeta").unwrap().gearpieces[0].id();

    let listed = solver.solve(&store, &inventory);
    assert_eq!(listed.gearpiece_state(zeta), Some(RequirementState::Collected));

    store.set_priority_policy(PriorityPolicy::ByName);
    let by_name = solver.solve(&store, &inventory);
    assert_eq!(by_name.gearpiece_state(zeta), Some(RequirementState::NotObtainable));

    store.set_priority_policy(PriorityPolicy::ByJob);
    let by_job = solver.solve(&store, &inventory);
    assert_eq!(by_job.gearpiece_state(zeta), Some(RequirementState::Collected));
}

#[test]
fn collected_flags_claim_nothing() {
    let catalog = catalog();
    let mut gearset = savage();
    for piece in &mut gearset.gearpieces {
        piece.is_collected = true;
    }
    let store = GearsetStore::from_gearsets(vec![gearset, alt()]).unwrap();
    let inventory = InventorySnapshot::new().with(HEAD, 1).with(TWINE, 1);

    let resolution = AssignmentSolver::new(&catalog).solve(&store, &inventory);

    assert_eq!(resolution.gearset_progress()[0].collected, 3);
    // the flagged gearset left the owned head and twine for the next one
    assert_eq!(
        state_of(&resolution, &store, 1, GearpieceSlot::Head),
        Some(RequirementState::Collected)
    );
    assert_eq!(
        state_of(&resolution, &store, 1, GearpieceSlot::Body),
        Some(RequirementState::ObtainableFull)
    );
}

#[test]
fn resolution_state_respects_filter() {
    let catalog = catalog();
    let store = GearsetStore::from_gearsets(vec![savage()]).unwrap();
    let inventory = InventorySnapshot::new().with(CRIT, 1);
    let resolution = AssignmentSolver::new(&catalog).solve(&store, &inventory);
    let crit = ItemId::new(CRIT);

    assert_eq!(
        resolution.resolution_state(crit, RequirementFilter::default()),
        Some(RequirementState::NotObtainable)
    );
    let no_materia = RequirementFilter {
        include_materia: false,
        ..RequirementFilter::default()
    };
    assert_eq!(resolution.resolution_state(crit, no_materia), None);
    assert_eq!(resolution.resolution_state(ItemId::new(999), RequirementFilter::everything()), None);
}

#[test]
fn overlap_groups_are_minimal() {
    let store = GearsetStore::from_gearsets(vec![
        Gearset::new(
            "A",
            vec![
                Gearpiece::new(GearpieceSlot::Head, 1),
                Gearpiece::new(GearpieceSlot::Body, 2),
            ],
        ),
        Gearset::new(
            "B",
            vec![
                Gearpiece::new(GearpieceSlot::Head, 1),
                Gearpiece::new(GearpieceSlot::Body, 2),
            ],
        ),
        Gearset::new("C", vec![Gearpiece::new(GearpieceSlot::Head, 1)]),
    ])
    .unwrap();
    let groups = detect_overlaps(&store, &CountSelection::all(&store));

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].gearsets.len(), 3);
    for (i, a) in groups.iter().enumerate() {
        for b in groups.iter().skip(i + 1) {
            assert_ne!(a.gearsets, b.gearsets);
        }
    }
}

#[test]
fn estimator_boundaries_for_single_socket() {
    let group = MateriaGroup::from_probabilities(ItemId::new(CRIT), [0.70]);
    assert_eq!(
        materia_needed(&group, Confidence::new(0.70), RoundingPolicy::Pooled),
        1
    );
    assert_eq!(
        materia_needed(&group, Confidence::new(0.91), RoundingPolicy::Pooled),
        2
    );
    assert_eq!(
        materia_needed(&group, Confidence::new(0.91), RoundingPolicy::PerSlot),
        2
    );
}

#[test]
fn estimate_grows_with_confidence() {
    let group = MateriaGroup::from_probabilities(ItemId::new(CRIT), [0.17, 0.17, 1.0, 0.5]);
    for policy in [RoundingPolicy::Pooled, RoundingPolicy::PerSlot] {
        let mut previous = 0;
        for step in 1..=99 {
            let needed = materia_needed(&group, Confidence::from_percent(step), policy);
            assert!(needed >= previous, "{:?} dropped at {}%", policy, step);
            assert!(needed >= group.slot_count() as u32);
            previous = needed;
        }
    }
}
