use crate::workflows::inspection::cycles::catalog::*;
use crate::workflows::inspection::{
    decision_matrix, select_cycle, write_matrix_csv, AreaFamily, DefectType, EnvironmentCategory,
    RECOGNIZED_AREAS,
};

#[test]
fn recognized_areas_map_to_specific_families() {
    for area in RECOGNIZED_AREAS {
        assert_ne!(AreaFamily::classify(area), AreaFamily::Generic, "{area}");
    }
    assert_eq!(AreaFamily::classify("Deck"), AreaFamily::DeckOrHatch);
    assert_eq!(AreaFamily::classify("Hatch Covers"), AreaFamily::DeckOrHatch);
}

#[test]
fn internal_decks_are_not_exterior_decks() {
    assert_eq!(
        AreaFamily::classify("Internal Decks"),
        AreaFamily::InternalDecks
    );
    let cycle = select_cycle(
        "Internal Decks",
        DefectType::GeneralCorrosion,
        EnvironmentCategory::CX,
    );
    assert_eq!(cycle.products, vec![SIGMASHIELD_880, SIGMADUR_520_NON_SKID]);
}

#[test]
fn underwater_hull_wins_over_hull() {
    assert_eq!(
        AreaFamily::classify("underwater hull"),
        AreaFamily::UnderwaterHull
    );
    assert_eq!(
        AreaFamily::classify("Flat bottom"),
        AreaFamily::UnderwaterHull
    );
}

#[test]
fn unknown_area_falls_back_to_generic_cycle() {
    assert_eq!(AreaFamily::classify("Engine funnel"), AreaFamily::Generic);
    let cycle = select_cycle("", DefectType::Pitting, EnvironmentCategory::C4);
    assert!(!cycle.products.is_empty());
    assert!(cycle.surface_prep.starts_with("Generic cleaning"));
}

#[test]
fn ballast_tank_uses_barrier_build_in_severe_environments() {
    let mild = select_cycle(
        "Ballast Tank",
        DefectType::GeneralCorrosion,
        EnvironmentCategory::C4,
    );
    assert_eq!(mild.products, vec![SIGMAPRIME_200]);
    assert!(mild.surface_prep.contains("Sa 2½"));

    let marine = select_cycle(
        "Ballast Tank",
        DefectType::GeneralCorrosion,
        EnvironmentCategory::C5M,
    );
    assert_eq!(marine.products, vec![SIGMAGUARD_1200_BARRIER]);
}

#[test]
fn pitting_always_starts_with_a_stripe_coat() {
    for area in RECOGNIZED_AREAS {
        for env in EnvironmentCategory::ALL {
            let cycle = select_cycle(area, DefectType::Pitting, env);
            let first = cycle.products.first().expect("non-empty cycle");
            assert!(first.dft.contains("stripe"), "{area} {env}: {}", first.name);
        }
    }
}

#[test]
fn fresh_water_tank_stays_on_certified_products() {
    for defect in DefectType::ALL {
        let cycle = select_cycle(
            "Fresh/Drinking Water Tank",
            defect,
            EnvironmentCategory::C5M,
        );
        assert!(
            cycle
                .products
                .iter()
                .all(|product| product.name == SIGMAGUARD_CSF_585.name),
            "{defect}"
        );
    }
}

#[test]
fn fouling_on_underwater_hull_routes_to_antifouling() {
    let cycle = select_cycle(
        "Underwater Hull",
        DefectType::Fouling,
        EnvironmentCategory::C5M,
    );
    assert_eq!(cycle.products, vec![ECOFLEET_530]);
    assert!(cycle.surface_prep.contains("biofouling"));
}

#[test]
fn fouling_elsewhere_cleans_before_the_base_system() {
    let cycle = select_cycle("Hull/Topside", DefectType::Fouling, EnvironmentCategory::C4);
    assert!(cycle.surface_prep.starts_with("Remove fouling"));
    assert_eq!(cycle.products, vec![SIGMACOVER_350, SIGMADUR_550]);
}

#[test]
fn blistering_rebuilds_with_barrier_grade_even_in_mild_environments() {
    let cycle = select_cycle(
        "Hull/Topside",
        DefectType::Blistering,
        EnvironmentCategory::C3,
    );
    assert_eq!(cycle.products, vec![SIGMACOVER_380, SIGMADUR_550]);
    assert!(cycle.surface_prep.contains("blisters"));
}

#[test]
fn mechanical_damage_uses_fast_dry_spot_repair_with_finish_alternative() {
    let cycle = select_cycle(
        "Hull/Topside",
        DefectType::MechanicalDamage,
        EnvironmentCategory::C4,
    );
    assert_eq!(cycle.products, vec![SIGMARINE_28, SIGMADUR_550]);
    assert_eq!(cycle.alternatives.len(), 1);
    assert_eq!(
        cycle.alternatives[0].products,
        vec![SIGMARINE_28, SIGMACOVER_435_FINISH]
    );
}

#[test]
fn mechanical_damage_without_fast_dry_primer_repairs_with_full_system() {
    let cycle = select_cycle(
        "Ballast Tank",
        DefectType::MechanicalDamage,
        EnvironmentCategory::C4,
    );
    assert_eq!(cycle.products, vec![SIGMAPRIME_200]);
    assert!(cycle.surface_prep.contains("full system"));
}

#[test]
fn economy_alternative_is_withheld_in_severe_environments() {
    let mild = select_cycle(
        "Superstructure",
        DefectType::GeneralCorrosion,
        EnvironmentCategory::C3,
    );
    assert_eq!(mild.alternatives.len(), 1);
    assert_eq!(
        mild.alternatives[0].products,
        vec![SIGMARINE_24_ALKYD_PRIMER, SIGMARINE_48_ALKYD]
    );

    let severe = select_cycle(
        "Superstructure",
        DefectType::GeneralCorrosion,
        EnvironmentCategory::C5M,
    );
    assert!(severe.alternatives.is_empty());
    assert_eq!(severe.products, vec![SIGMACOVER_380, SIGMADUR_550]);
}

#[test]
fn decision_matrix_covers_every_cell_with_products() {
    let rows = decision_matrix();
    assert_eq!(
        rows.len(),
        RECOGNIZED_AREAS.len() * DefectType::ALL.len() * EnvironmentCategory::ALL.len()
    );
    assert!(rows.iter().all(|row| !row.products.is_empty()));
    assert!(rows.iter().all(|row| row.family != "generic"));
}

#[test]
fn matrix_csv_has_header_and_one_line_per_cell() {
    let mut buffer = Vec::new();
    let written = write_matrix_csv(&mut buffer).expect("csv export");
    let text = String::from_utf8(buffer).expect("utf8 csv");

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("area,family,defect,environment,surface_prep,products,alternatives")
    );
    assert_eq!(written, 330);
    assert!(text.contains("Ballast Tank,ballast_tank,general_corrosion,C5M"));
}
