use serde::Serialize;

use super::super::domain::ProductRef;
use super::catalog::*;

/// Area families the decision table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaFamily {
    FreshWaterTank,
    BallastTank,
    HeatResistance,
    UnderwaterHull,
    InternalDecks,
    InternalVisibleSteel,
    DeckOrHatch,
    Superstructure,
    CargoHold,
    HullTopside,
    Generic,
}

impl AreaFamily {
    /// First matching rule wins; anything unmatched lands in `Generic`.
    pub fn classify(area: &str) -> Self {
        let normalized = area.trim().to_lowercase();
        AREA_RULES
            .iter()
            .find(|rule| (rule.matches)(&normalized))
            .map(|rule| rule.family)
            .unwrap_or(AreaFamily::Generic)
    }

    pub const fn label(self) -> &'static str {
        match self {
            AreaFamily::FreshWaterTank => "fresh_water_tank",
            AreaFamily::BallastTank => "ballast_tank",
            AreaFamily::HeatResistance => "heat_resistance",
            AreaFamily::UnderwaterHull => "underwater_hull",
            AreaFamily::InternalDecks => "internal_decks",
            AreaFamily::InternalVisibleSteel => "internal_visible_steel",
            AreaFamily::DeckOrHatch => "deck_or_hatch",
            AreaFamily::Superstructure => "superstructure",
            AreaFamily::CargoHold => "cargo_hold",
            AreaFamily::HullTopside => "hull_topside",
            AreaFamily::Generic => "generic",
        }
    }

    pub(crate) fn profile(self) -> &'static AreaProfile {
        match self {
            AreaFamily::FreshWaterTank => &FRESH_WATER_TANK,
            AreaFamily::BallastTank => &BALLAST_TANK,
            AreaFamily::HeatResistance => &HEAT_RESISTANCE,
            AreaFamily::UnderwaterHull => &UNDERWATER_HULL,
            AreaFamily::InternalDecks => &INTERNAL_DECKS,
            AreaFamily::InternalVisibleSteel => &INTERNAL_VISIBLE_STEEL,
            AreaFamily::DeckOrHatch => &DECK_OR_HATCH,
            AreaFamily::Superstructure => &SUPERSTRUCTURE,
            AreaFamily::CargoHold => &CARGO_HOLD,
            AreaFamily::HullTopside => &HULL_TOPSIDE,
            AreaFamily::Generic => &GENERIC,
        }
    }
}

/// Area names offered to inspectors.
pub const RECOGNIZED_AREAS: [&str; 11] = [
    "Hull/Topside",
    "Deck",
    "Ballast Tank",
    "Superstructure",
    "Underwater Hull",
    "Hatch Covers",
    "Cargo Holds Dry",
    "Internal Visible Steel",
    "Internal Decks",
    "Fresh/Drinking Water Tank",
    "Heat Resistance",
];

/// Predicate over a trimmed, lowercased area string.
pub(crate) struct AreaRule {
    pub family: AreaFamily,
    pub matches: fn(&str) -> bool,
}

/// Evaluation order is load-bearing: predicates overlap ("internal decks" contains "deck",
/// "underwater hull" contains "hull").
pub(crate) const AREA_RULES: &[AreaRule] = &[
    AreaRule {
        family: AreaFamily::FreshWaterTank,
        matches: is_fresh_water,
    },
    AreaRule {
        family: AreaFamily::BallastTank,
        matches: is_ballast,
    },
    AreaRule {
        family: AreaFamily::HeatResistance,
        matches: is_heat_resistant,
    },
    AreaRule {
        family: AreaFamily::UnderwaterHull,
        matches: is_underwater,
    },
    AreaRule {
        family: AreaFamily::InternalDecks,
        matches: is_internal_deck,
    },
    AreaRule {
        family: AreaFamily::InternalVisibleSteel,
        matches: is_internal,
    },
    AreaRule {
        family: AreaFamily::DeckOrHatch,
        matches: is_deck_or_hatch,
    },
    AreaRule {
        family: AreaFamily::Superstructure,
        matches: is_superstructure,
    },
    AreaRule {
        family: AreaFamily::CargoHold,
        matches: is_cargo_hold,
    },
    AreaRule {
        family: AreaFamily::HullTopside,
        matches: is_hull_topside,
    },
];

fn is_fresh_water(area: &str) -> bool {
    area.contains("fresh") || area.contains("drinking") || area.contains("potable")
}

fn is_ballast(area: &str) -> bool {
    area.contains("ballast")
}

fn is_heat_resistant(area: &str) -> bool {
    area.contains("heat")
}

fn is_underwater(area: &str) -> bool {
    area.contains("underwater") || area.contains("bottom")
}

fn is_internal_deck(area: &str) -> bool {
    area.contains("internal") && area.contains("deck")
}

fn is_internal(area: &str) -> bool {
    area.contains("internal")
}

fn is_deck_or_hatch(area: &str) -> bool {
    area.contains("deck") || area.contains("hatch")
}

fn is_superstructure(area: &str) -> bool {
    area.contains("superstructure")
}

fn is_cargo_hold(area: &str) -> bool {
    area.contains("cargo") || area.contains("hold")
}

fn is_hull_topside(area: &str) -> bool {
    area.contains("hull") || area.contains("topside") || area.contains("freeboard")
}

/// Coating system and routing data for one area family.
pub(crate) struct AreaProfile {
    pub surface_prep: &'static str,
    pub primers: &'static [ProductRef],
    /// Standard-build body coat.
    pub build: ProductRef,
    /// Barrier-grade body coat for severe environments and rebuilds.
    pub barrier_build: Option<ProductRef>,
    pub finishes: &'static [ProductRef],
    pub stripe: ProductRef,
    pub fast_dry_primer: Option<ProductRef>,
    pub antifouling: Option<FoulingRoute>,
    pub alternatives: &'static [AlternativeTemplate],
}

pub(crate) struct FoulingRoute {
    pub surface_prep: &'static str,
    pub products: &'static [ProductRef],
}

pub(crate) enum AlternativeTemplate {
    /// Same build with a different finish family.
    FinishSwap {
        finishes: &'static [ProductRef],
        note: Option<&'static str>,
    },
    /// Cheaper cycle; only offered outside severe environments.
    Economy {
        products: &'static [ProductRef],
        note: &'static str,
    },
}

const HULL_TOPSIDE: AreaProfile = AreaProfile {
    surface_prep: "St 3 local, removal of salts and contaminants, profile restoration",
    primers: &[],
    build: SIGMACOVER_350,
    barrier_build: Some(SIGMACOVER_380),
    finishes: &[SIGMADUR_550],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: Some(SIGMARINE_28),
    antifouling: None,
    alternatives: &[AlternativeTemplate::FinishSwap {
        finishes: &[SIGMACOVER_435_FINISH],
        note: Some("epoxy finish costs less but loses gloss and colour under UV; acceptable where appearance is secondary"),
    }],
};

const SUPERSTRUCTURE: AreaProfile = AreaProfile {
    surface_prep: "St 3 local, low-pressure fresh-water wash, light sanding of intact coating",
    primers: &[],
    build: SIGMACOVER_350,
    barrier_build: Some(SIGMACOVER_380),
    finishes: &[SIGMADUR_550],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: Some(SIGMARINE_28),
    antifouling: None,
    alternatives: &[AlternativeTemplate::Economy {
        products: &[SIGMARINE_24_ALKYD_PRIMER, SIGMARINE_48_ALKYD],
        note: "two-coat alkyd is cheaper and easier to apply but has a shorter service life",
    }],
};

const DECK_OR_HATCH: AreaProfile = AreaProfile {
    surface_prep: "St 3 local, degrease, remove salts, feather edges of sound coating",
    primers: &[],
    build: SIGMASHIELD_880,
    barrier_build: Some(SIGMASHIELD_905_BARRIER),
    finishes: &[SIGMADUR_520_NON_SKID],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: Some(SIGMARINE_28),
    antifouling: None,
    alternatives: &[AlternativeTemplate::FinishSwap {
        finishes: &[SIGMACOVER_435_FINISH],
        note: Some("epoxy finish wears better under traffic but chalks in sunlight"),
    }],
};

const UNDERWATER_HULL: AreaProfile = AreaProfile {
    surface_prep: "HP fresh-water wash, spot blast to Sa 2 on corroded areas, sweep-blast adjacent coating",
    primers: &[SIGMACOVER_280],
    build: SIGMACOVER_350,
    barrier_build: Some(SIGMACOVER_380),
    finishes: &[SIGMA_TIE_COAT_790, ECOFLEET_530],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: None,
    antifouling: Some(FoulingRoute {
        surface_prep: "Underwater cleaning, biofouling removal, light sanding of the existing antifouling",
        products: &[ECOFLEET_530],
    }),
    alternatives: &[],
};

const BALLAST_TANK: AreaProfile = AreaProfile {
    surface_prep: "Sa 2½ local blasting (St 3 where blasting is impossible), fresh-water wash to remove salts",
    primers: &[],
    build: SIGMAPRIME_200,
    barrier_build: Some(SIGMAGUARD_1200_BARRIER),
    finishes: &[],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: None,
    antifouling: None,
    alternatives: &[],
};

const FRESH_WATER_TANK: AreaProfile = AreaProfile {
    surface_prep: "Sa 2½ blasting, soluble salts below 50 mg/m², dust removal; respect the certified cure time before filling",
    primers: &[],
    build: SIGMAGUARD_CSF_585,
    barrier_build: None,
    finishes: &[],
    stripe: SIGMAGUARD_CSF_585_STRIPE,
    fast_dry_primer: None,
    antifouling: None,
    alternatives: &[],
};

const HEAT_RESISTANCE: AreaProfile = AreaProfile {
    surface_prep: "Sa 2½ blasting, remove all organic coating residues",
    primers: &[SIGMATHERM_350_PRIMER],
    build: SIGMATHERM_540,
    barrier_build: None,
    finishes: &[],
    stripe: SIGMATHERM_540_STRIPE,
    fast_dry_primer: None,
    antifouling: None,
    alternatives: &[],
};

const CARGO_HOLD: AreaProfile = AreaProfile {
    surface_prep: "Sa 2 local or St 3, remove cargo residues, fresh-water wash and dry",
    primers: &[],
    build: SIGMACOVER_410_HOLD,
    barrier_build: None,
    finishes: &[],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: Some(SIGMARINE_28),
    antifouling: None,
    alternatives: &[],
};

const INTERNAL_VISIBLE_STEEL: AreaProfile = AreaProfile {
    surface_prep: "St 2 to St 3 local, degrease, dust removal",
    primers: &[],
    build: SIGMACOVER_240_INTERIOR,
    barrier_build: None,
    finishes: &[SIGMADUR_550],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: Some(SIGMARINE_28),
    antifouling: None,
    alternatives: &[
        AlternativeTemplate::FinishSwap {
            finishes: &[SIGMACOVER_435_FINISH],
            note: None,
        },
        AlternativeTemplate::Economy {
            products: &[SIGMARINE_24_ALKYD_PRIMER, SIGMARINE_48_ALKYD],
            note: "two-coat alkyd is cheaper and adequate for dry interiors but has lower chemical resistance",
        },
    ],
};

const INTERNAL_DECKS: AreaProfile = AreaProfile {
    surface_prep: "St 3 local, degrease, remove oil and grease residues",
    primers: &[],
    build: SIGMASHIELD_880,
    barrier_build: None,
    finishes: &[SIGMADUR_520_NON_SKID],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: Some(SIGMARINE_28),
    antifouling: None,
    alternatives: &[AlternativeTemplate::FinishSwap {
        finishes: &[SIGMACOVER_435_FINISH],
        note: Some("epoxy finish is harder wearing and fine away from UV"),
    }],
};

const GENERIC: AreaProfile = AreaProfile {
    surface_prep: "Generic cleaning: degrease, fresh-water wash, remove loose rust and coating (St 2)",
    primers: &[],
    build: GENERIC_ANTICORROSIVE,
    barrier_build: None,
    finishes: &[GENERIC_FINISH],
    stripe: SIGMACOVER_456_STRIPE,
    fast_dry_primer: None,
    antifouling: None,
    alternatives: &[],
};
