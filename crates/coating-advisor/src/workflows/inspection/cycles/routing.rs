use super::super::domain::{
    AlternativeCycle, CoatingCycle, DefectType, EnvironmentCategory, ProductRef,
};
use super::table::{AlternativeTemplate, AreaProfile};

const PITTING_STEP: &str = "stripe coat edges, welds and pits ahead of the full coat";
const BLISTERING_STEP: &str =
    "open and remove blisters, feather edges to sound coating, fresh-water wash, seal with a barrier coat";
const DELAMINATION_STEP: &str =
    "remove non-adherent coating back to firmly bonded edges, feather and restore the profile";
const MECHANICAL_DAMAGE_STEP: &str =
    "sand and roughen the damaged area and surrounding coating, restore the profile, spot-prime with a fast-drying primer";
const MECHANICAL_DAMAGE_FULL_SYSTEM_STEP: &str =
    "sand and roughen the damaged area and surrounding coating, restore the profile, spot-repair with the full system";
const FOULING_CLEANING_STEP: &str =
    "Remove fouling, sediment and biofilm by scraping and high-pressure fresh-water wash";

/// Build the cycle for one defect inside an area family.
pub(crate) fn route(
    profile: &AreaProfile,
    defect: DefectType,
    env: EnvironmentCategory,
) -> CoatingCycle {
    match defect {
        DefectType::Fouling => match &profile.antifouling {
            Some(route) => CoatingCycle {
                surface_prep: route.surface_prep.to_string(),
                products: route.products.to_vec(),
                alternatives: Vec::new(),
            },
            None => CoatingCycle {
                surface_prep: format!("{FOULING_CLEANING_STEP}; {}", profile.surface_prep),
                products: base_system(profile, env, profile.finishes),
                alternatives: Vec::new(),
            },
        },
        DefectType::Pitting => {
            let mut products = vec![profile.stripe];
            products.extend(base_system(profile, env, profile.finishes));
            CoatingCycle {
                surface_prep: with_step(profile, PITTING_STEP),
                products,
                alternatives: Vec::new(),
            }
        }
        DefectType::Blistering => CoatingCycle {
            surface_prep: with_step(profile, BLISTERING_STEP),
            products: rebuild_system(profile),
            alternatives: Vec::new(),
        },
        DefectType::Delamination => CoatingCycle {
            surface_prep: with_step(profile, DELAMINATION_STEP),
            products: rebuild_system(profile),
            alternatives: Vec::new(),
        },
        DefectType::MechanicalDamage => {
            let step = if profile.fast_dry_primer.is_some() {
                MECHANICAL_DAMAGE_STEP
            } else {
                MECHANICAL_DAMAGE_FULL_SYSTEM_STEP
            };
            CoatingCycle {
                surface_prep: with_step(profile, step),
                products: spot_repair_system(profile, env, profile.finishes),
                alternatives: alternatives(profile, defect, env),
            }
        }
        DefectType::GeneralCorrosion => CoatingCycle {
            surface_prep: profile.surface_prep.to_string(),
            products: base_system(profile, env, profile.finishes),
            alternatives: alternatives(profile, defect, env),
        },
    }
}

fn with_step(profile: &AreaProfile, step: &str) -> String {
    format!("{}; {step}", profile.surface_prep)
}

/// Primers, then the body coat (barrier grade in severe environments), then finishes.
fn base_system(
    profile: &AreaProfile,
    env: EnvironmentCategory,
    finishes: &[ProductRef],
) -> Vec<ProductRef> {
    let build = match profile.barrier_build {
        Some(barrier) if env.is_severe() => barrier,
        _ => profile.build,
    };

    let mut products = profile.primers.to_vec();
    products.push(build);
    products.extend_from_slice(finishes);
    products
}

/// Damaged film is rebuilt with the barrier grade regardless of environment.
fn rebuild_system(profile: &AreaProfile) -> Vec<ProductRef> {
    let mut products = profile.primers.to_vec();
    products.push(profile.barrier_build.unwrap_or(profile.build));
    products.extend_from_slice(profile.finishes);
    products
}

fn spot_repair_system(
    profile: &AreaProfile,
    env: EnvironmentCategory,
    finishes: &[ProductRef],
) -> Vec<ProductRef> {
    match profile.fast_dry_primer {
        Some(primer) => {
            let mut products = vec![primer];
            if finishes.is_empty() {
                products.push(profile.build);
            } else {
                products.extend_from_slice(finishes);
            }
            products
        }
        None => base_system(profile, env, finishes),
    }
}

fn alternatives(
    profile: &AreaProfile,
    defect: DefectType,
    env: EnvironmentCategory,
) -> Vec<AlternativeCycle> {
    profile
        .alternatives
        .iter()
        .filter_map(|template| match template {
            AlternativeTemplate::FinishSwap { finishes, note } => {
                let products = match defect {
                    DefectType::MechanicalDamage => spot_repair_system(profile, env, finishes),
                    _ => base_system(profile, env, finishes),
                };
                Some(AlternativeCycle {
                    products,
                    note: *note,
                })
            }
            AlternativeTemplate::Economy { products, note } if !env.is_severe() => {
                Some(AlternativeCycle {
                    products: products.to_vec(),
                    note: Some(*note),
                })
            }
            AlternativeTemplate::Economy { .. } => None,
        })
        .collect()
}
