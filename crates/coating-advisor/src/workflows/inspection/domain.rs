use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Text attached to every report; recommendations are advisory only.
pub const DISCLAIMER: &str = "Non-binding AI output; always verify product TDS/SDS and actual yard conditions before specifying a repair.";

/// Sentinel used by clients to request the location-based estimate.
pub const AUTO_ENVIRONMENT: &str = "Auto";

/// ISO 12944-style corrosivity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentCategory {
    C3,
    C4,
    C5I,
    C5M,
    CX,
}

impl EnvironmentCategory {
    pub const ALL: [EnvironmentCategory; 5] = [
        EnvironmentCategory::C3,
        EnvironmentCategory::C4,
        EnvironmentCategory::C5I,
        EnvironmentCategory::C5M,
        EnvironmentCategory::CX,
    ];

    /// Corrosivity rank. C5I and C5M share a rank: neither is worse than the other.
    pub const fn rank(self) -> u8 {
        match self {
            EnvironmentCategory::C3 => 0,
            EnvironmentCategory::C4 => 1,
            EnvironmentCategory::C5I | EnvironmentCategory::C5M => 2,
            EnvironmentCategory::CX => 3,
        }
    }

    /// Categories that call for barrier-grade build.
    pub const fn is_severe(self) -> bool {
        matches!(
            self,
            EnvironmentCategory::C5I | EnvironmentCategory::C5M | EnvironmentCategory::CX
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            EnvironmentCategory::C3 => "C3",
            EnvironmentCategory::C4 => "C4",
            EnvironmentCategory::C5I => "C5I",
            EnvironmentCategory::C5M => "C5M",
            EnvironmentCategory::CX => "CX",
        }
    }
}

impl fmt::Display for EnvironmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported environment category '{0}' (expected C3, C4, C5I, C5M or CX)")]
pub struct UnknownEnvironment(pub String);

impl FromStr for EnvironmentCategory {
    type Err = UnknownEnvironment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        match compact.as_str() {
            "C3" => Ok(Self::C3),
            "C4" => Ok(Self::C4),
            "C5I" => Ok(Self::C5I),
            "C5M" => Ok(Self::C5M),
            "CX" => Ok(Self::CX),
            _ => Err(UnknownEnvironment(value.to_string())),
        }
    }
}

/// Defect families the classifier is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectType {
    #[default]
    GeneralCorrosion,
    Pitting,
    Blistering,
    Delamination,
    MechanicalDamage,
    Fouling,
}

impl DefectType {
    pub const ALL: [DefectType; 6] = [
        DefectType::GeneralCorrosion,
        DefectType::Pitting,
        DefectType::Blistering,
        DefectType::Delamination,
        DefectType::MechanicalDamage,
        DefectType::Fouling,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DefectType::GeneralCorrosion => "general_corrosion",
            DefectType::Pitting => "pitting",
            DefectType::Blistering => "blistering",
            DefectType::Delamination => "delamination",
            DefectType::MechanicalDamage => "mechanical_damage",
            DefectType::Fouling => "fouling",
        }
    }

    /// Lenient parse of classifier labels such as `"Mechanical Damage"` or `"pitting-corrosion"`.
    pub fn from_label(raw: &str) -> Option<Self> {
        let key = normalize_label(raw);
        match key.as_str() {
            "general_corrosion" | "corrosion" | "rust" => Some(Self::GeneralCorrosion),
            "pitting" | "pitting_corrosion" => Some(Self::Pitting),
            "blistering" | "blister" | "blisters" => Some(Self::Blistering),
            "delamination" | "peeling" | "flaking" => Some(Self::Delamination),
            "mechanical_damage" | "mechanical" | "abrasion" | "impact_damage" => {
                Some(Self::MechanicalDamage)
            }
            "fouling" | "biofouling" => Some(Self::Fouling),
            _ => None,
        }
    }
}

impl fmt::Display for DefectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    #[default]
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_label(raw: &str) -> Option<Self> {
        match normalize_label(raw).as_str() {
            "minor" | "low" | "light" => Some(Self::Minor),
            "moderate" | "medium" => Some(Self::Moderate),
            "severe" | "high" | "heavy" => Some(Self::Severe),
            _ => None,
        }
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Per-image classification after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Defect {
    #[serde(rename = "type")]
    pub kind: DefectType,
    pub severity: Severity,
    pub confidence: f32,
    pub notes: String,
}

impl Defect {
    pub const DEFAULT_CONFIDENCE: f32 = 0.5;

    /// Low-confidence placeholder used when the classifier gives nothing usable.
    pub fn fallback(notes: impl Into<String>) -> Self {
        Self {
            kind: DefectType::GeneralCorrosion,
            severity: Severity::Moderate,
            confidence: Self::DEFAULT_CONFIDENCE,
            notes: notes.into(),
        }
    }
}

/// Catalog entry: product name, dry-film thickness and application note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductRef {
    pub name: &'static str,
    pub dft: &'static str,
    pub notes: &'static str,
}

/// Equivalent cycle offered next to the main recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeCycle {
    pub products: Vec<ProductRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Repair recommendation. `products` is in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoatingCycle {
    pub surface_prep: String,
    pub products: Vec<ProductRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeCycle>,
}

/// Where an item's defect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectSource {
    Classifier,
    Default,
}

/// One entry per submitted image, same index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub defect: Defect,
    pub recommendation: CoatingCycle,
    pub source: DefectSource,
}

/// Opaque image reference, typically a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Inspection context supplied with the photos. Unrecognized fields are kept and echoed back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InspectionMeta {
    /// The explicit environment override, if the caller set one.
    pub fn environment_override(&self) -> Option<&str> {
        self.environment
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(AUTO_ENVIRONMENT))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    #[serde(flatten)]
    pub input: InspectionMeta,
    pub estimated_env: EnvironmentCategory,
    pub effective_env: EnvironmentCategory,
}

impl ReportMeta {
    /// Echo the caller's metadata next to the computed environments. Caller-supplied keys
    /// that collide with the computed ones are dropped.
    pub fn new(
        mut input: InspectionMeta,
        estimated_env: EnvironmentCategory,
        effective_env: EnvironmentCategory,
    ) -> Self {
        input.extra.remove("estimatedEnv");
        input.extra.remove("effectiveEnv");
        Self {
            input,
            estimated_env,
            effective_env,
        }
    }
}

/// Engine output returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub meta: ReportMeta,
    pub items: Vec<Item>,
    pub disclaimer: &'static str,
    pub generated_at: DateTime<Utc>,
}

/// HTTP request body for an analysis. A missing or malformed `images` field becomes an empty
/// list so the service rejects it with a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectionRequest {
    #[serde(default, deserialize_with = "lenient_images")]
    pub images: Vec<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: InspectionMeta,
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_images<'de, D>(deserializer: D) -> Result<Vec<ImageRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let images = match value {
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(url) if !url.trim().is_empty() => Some(ImageRef(url)),
                _ => None,
            })
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };
    Ok(images.unwrap_or_default())
}

/// Follow-up question for the assistant, with the last report as context.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub meta: Value,
    #[serde(default)]
    pub last_result: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUpAnswer {
    pub answer: String,
}
