//! Technology detection over file paths and captured file contents.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::signatures::SIGNATURES;
use crate::entity::technology_category::TechnologyCategory;
use crate::taxonomy;

/// A technology found in a source tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedTechnology {
    pub name: String,
    pub category: TechnologyCategory,
    pub confidence: f32,
}

/// Detect technologies from relative `paths` and the captured `contents` of
/// important files (keyed by relative path).
///
/// A signature fires when any of its patterns matches any path or the
/// concatenated contents. The result is deduplicated by name and sorted by
/// confidence, highest first; ties keep table order.
pub fn detect<P: AsRef<str>>(
    paths: &[P],
    contents: &BTreeMap<String, String>,
) -> Vec<DetectedTechnology> {
    let corpus = contents
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    let mut seen = HashSet::new();
    let mut detected: Vec<DetectedTechnology> = SIGNATURES
        .iter()
        .filter(|signature| {
            paths.iter().any(|path| signature.matches(path.as_ref()))
                || signature.matches(&corpus)
        })
        .filter(|signature| seen.insert(signature.name))
        .map(|signature| DetectedTechnology {
            name: signature.name.to_string(),
            category: taxonomy::category_for(signature.name),
            confidence: signature.confidence,
        })
        .collect();

    detected.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    detected
}
