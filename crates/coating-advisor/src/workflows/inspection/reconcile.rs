//! Turns untrusted classifier text into exactly one item per submitted image.
//!
//! Parsing is two-stage: a strict JSON parse, then extraction of an embedded `{...}` object
//! from surrounding prose. Output that survives neither stage degrades to default defects;
//! it is never reported as an error.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::cycles::select_cycle;
use super::domain::{Defect, DefectSource, DefectType, EnvironmentCategory, Item, Severity};

/// Notes on defects synthesized because the payload carried no `items` list.
pub const SYNTHESIZED_NOTES: &str = "default";
/// Notes on defects padded in for images the classifier skipped.
pub const MISSING_ENTRY_NOTES: &str = "default: classifier returned no entry for this image";

fn embedded_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("embedded object pattern is valid"))
}

/// Stage one: the whole text is a JSON document.
pub fn parse_strict(raw: &str) -> Option<Value> {
    serde_json::from_str(raw.trim()).ok()
}

/// Stage two: the first `{` through the last `}` is a JSON document. When stray braces in the
/// surrounding prose break that block, the first object that parses from any `{` is taken.
pub fn extract_embedded(raw: &str) -> Option<Value> {
    let block = embedded_object_pattern().find(raw)?;
    if let Ok(value) = serde_json::from_str(block.as_str()) {
        return Some(value);
    }

    raw.match_indices('{').find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&raw[start..])
            .into_iter::<Value>()
            .next()
            .and_then(Result::ok)
            .filter(Value::is_object)
    })
}

pub fn parse_classifier_output(raw: &str) -> Option<Value> {
    if let Some(value) = parse_strict(raw) {
        return Some(value);
    }

    debug!("classifier output is not bare JSON; trying embedded object");
    extract_embedded(raw)
}

/// Reconcile classifier text into `image_count` items with recommendations attached.
pub fn reconcile(
    raw: &str,
    image_count: usize,
    env: EnvironmentCategory,
    area: &str,
) -> Vec<Item> {
    let mut defects = match parse_classifier_output(raw) {
        Some(value) => classified_defects(&value, image_count),
        None => {
            warn!(
                image_count,
                "classifier output unrecoverable; falling back to default defects"
            );
            Vec::new()
        }
    };

    if defects.len() > image_count {
        debug!(
            returned = defects.len(),
            image_count, "dropping classifier entries beyond image count"
        );
        defects.truncate(image_count);
    }

    if defects.len() < image_count {
        warn!(
            returned = defects.len(),
            image_count, "classifier returned fewer entries than images; padding with defaults"
        );
        defects.resize_with(image_count, || {
            (Defect::fallback(MISSING_ENTRY_NOTES), DefectSource::Default)
        });
    }

    defects
        .into_iter()
        .map(|(defect, source)| Item {
            recommendation: select_cycle(area, defect.kind, env),
            defect,
            source,
        })
        .collect()
}

fn classified_defects(value: &Value, image_count: usize) -> Vec<(Defect, DefectSource)> {
    match value.get("items").and_then(Value::as_array) {
        Some(entries) => entries.iter().map(defect_from_entry).collect(),
        None => {
            debug!("classifier payload has no items list; synthesizing defaults");
            (0..image_count)
                .map(|_| (Defect::fallback(SYNTHESIZED_NOTES), DefectSource::Default))
                .collect()
        }
    }
}

/// Accepts `{"defect": {...}}` or a bare defect object carrying a `type`.
fn defect_from_entry(entry: &Value) -> (Defect, DefectSource) {
    let fields = entry
        .get("defect")
        .and_then(Value::as_object)
        .or_else(|| entry.as_object().filter(|object| object.contains_key("type")));

    match fields {
        Some(fields) => (defect_from_fields(fields), DefectSource::Classifier),
        None => (Defect::fallback(MISSING_ENTRY_NOTES), DefectSource::Default),
    }
}

fn defect_from_fields(fields: &Map<String, Value>) -> Defect {
    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(DefectType::from_label)
        .unwrap_or_default();
    let severity = fields
        .get("severity")
        .and_then(Value::as_str)
        .and_then(Severity::from_label)
        .unwrap_or_default();
    let confidence = fields
        .get("confidence")
        .and_then(confidence_value)
        .unwrap_or(Defect::DEFAULT_CONFIDENCE);
    let notes = fields
        .get("notes")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Defect {
        kind,
        severity,
        confidence,
        notes,
    }
}

/// Reads a number or numeric string; values in (1, 100] are taken as percentages.
fn confidence_value(value: &Value) -> Option<f32> {
    let raw = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !raw.is_finite() {
        return None;
    }

    let scaled = if raw > 1.0 && raw <= 100.0 {
        raw / 100.0
    } else {
        raw
    };
    Some(scaled.clamp(0.0, 1.0) as f32)
}
