//! Fixed product library referenced by the decision table.
//!
//! Product names follow the PPG marine range; DFT strings are nominal per-coat values and
//! the TDS of the batch on site always takes precedence.

use super::super::domain::ProductRef;

pub const SIGMACOVER_350: ProductRef = ProductRef {
    name: "Sigmacover 350",
    dft: "125 µm (1x)",
    notes: "anticorrosive epoxy intermediate",
};

pub const SIGMACOVER_380: ProductRef = ProductRef {
    name: "Sigmacover 380",
    dft: "125 µm (1x)",
    notes: "barrier/rebuild high-build epoxy",
};

pub const SIGMACOVER_456_STRIPE: ProductRef = ProductRef {
    name: "Sigmacover 456",
    dft: "100 µm (stripe)",
    notes: "high-solids stripe coat for edges, welds and pits",
};

pub const SIGMADUR_550: ProductRef = ProductRef {
    name: "Sigmadur 550",
    dft: "50 µm (1x)",
    notes: "polyurethane finish",
};

pub const SIGMARINE_28: ProductRef = ProductRef {
    name: "Sigmarine 28",
    dft: "75 µm (1x)",
    notes: "fast-drying primer for spot repairs",
};

pub const SIGMACOVER_435_FINISH: ProductRef = ProductRef {
    name: "Sigmacover 435",
    dft: "100 µm (1x)",
    notes: "epoxy finish; chalks under UV",
};

pub const SIGMARINE_48_ALKYD: ProductRef = ProductRef {
    name: "Sigmarine 48",
    dft: "40 µm (2x)",
    notes: "alkyd finish",
};

pub const SIGMARINE_24_ALKYD_PRIMER: ProductRef = ProductRef {
    name: "Sigmarine 24",
    dft: "40 µm (2x)",
    notes: "alkyd primer",
};

pub const SIGMACOVER_280: ProductRef = ProductRef {
    name: "Sigmacover 280",
    dft: "100 µm (1x)",
    notes: "underwater anticorrosive epoxy primer",
};

pub const SIGMA_TIE_COAT_790: ProductRef = ProductRef {
    name: "Sigmaprime 790",
    dft: "100 µm (1x)",
    notes: "tie-coat between epoxy and antifouling",
};

pub const ECOFLEET_530: ProductRef = ProductRef {
    name: "Ecofleet 530",
    dft: "follow TDS",
    notes: "antifouling; verify tie-coat compatibility",
};

pub const SIGMAPRIME_200: ProductRef = ProductRef {
    name: "Sigmaprime 200",
    dft: "160 µm (2x)",
    notes: "ballast tank epoxy, light colour for inspection",
};

pub const SIGMAGUARD_1200_BARRIER: ProductRef = ProductRef {
    name: "Sigmaguard 1200",
    dft: "200 µm (2x)",
    notes: "high-build immersion epoxy for aggressive service",
};

pub const SIGMAGUARD_CSF_585: ProductRef = ProductRef {
    name: "Sigmaguard CSF 585",
    dft: "150 µm (2x)",
    notes: "solvent-free epoxy certified for drinking water contact",
};

pub const SIGMAGUARD_CSF_585_STRIPE: ProductRef = ProductRef {
    name: "Sigmaguard CSF 585",
    dft: "brush (stripe)",
    notes: "stripe coat in the certified tank system",
};

pub const SIGMATHERM_350_PRIMER: ProductRef = ProductRef {
    name: "Sigmatherm 350",
    dft: "25 µm (1x)",
    notes: "heat-resistant zinc silicate primer",
};

pub const SIGMATHERM_540: ProductRef = ProductRef {
    name: "Sigmatherm 540",
    dft: "25 µm (2x)",
    notes: "silicone aluminium finish up to 540 °C",
};

pub const SIGMATHERM_540_STRIPE: ProductRef = ProductRef {
    name: "Sigmatherm 540",
    dft: "brush (stripe)",
    notes: "stripe on welds; do not exceed TDS maximum film",
};

pub const SIGMASHIELD_880: ProductRef = ProductRef {
    name: "Sigmashield 880",
    dft: "150 µm (1x)",
    notes: "abrasion-resistant epoxy for decks and hatch covers",
};

pub const SIGMASHIELD_905_BARRIER: ProductRef = ProductRef {
    name: "Sigmashield 905",
    dft: "200 µm (1x)",
    notes: "high-build abrasion-resistant barrier epoxy",
};

pub const SIGMADUR_520_NON_SKID: ProductRef = ProductRef {
    name: "Sigmadur 520",
    dft: "60 µm (1x)",
    notes: "polyurethane finish; broadcast aggregate for non-skid",
};

pub const SIGMACOVER_410_HOLD: ProductRef = ProductRef {
    name: "Sigmacover 410",
    dft: "150 µm (2x)",
    notes: "abrasion-resistant hold coating for dry cargo",
};

pub const SIGMACOVER_240_INTERIOR: ProductRef = ProductRef {
    name: "Sigmacover 240",
    dft: "100 µm (1x)",
    notes: "surface-tolerant epoxy for interior steel",
};

pub const GENERIC_ANTICORROSIVE: ProductRef = ProductRef {
    name: "Anticorrosive primer (generic)",
    dft: "per TDS",
    notes: "surface-tolerant anticorrosive; confirm against the existing system",
};

pub const GENERIC_FINISH: ProductRef = ProductRef {
    name: "Finish coat (generic)",
    dft: "per TDS",
    notes: "finish compatible with the primer selected",
};
