//! Catalog expansion over the tree.

use anamnesis_core::errors::AnamnesisResult;
use anamnesis_core::{Catalog, Hypothesis};

use crate::QuestionTree;

/// Fold tree ancestry into each hypothesis.
///
/// A positive question can only be reached after every question on its
/// path from the root was confirmed, so those ancestors are themselves
/// positive evidence and join the positive list. For taxonomies expressed
/// through the tree this replaces the equivalent general-specific rules
/// and keeps coverage scores comparable across branch depths.
pub fn expand_catalog(catalog: &Catalog, tree: &QuestionTree) -> AnamnesisResult<Catalog> {
    let mut expanded = Vec::with_capacity(catalog.len());
    for hypothesis in catalog.iter() {
        let mut positives = hypothesis.positive_questions.clone();
        for question in &hypothesis.positive_questions {
            if let Some(path) = tree.path_to(question) {
                for ancestor in path {
                    if !positives.iter().any(|p| p == ancestor) {
                        positives.push(ancestor.to_string());
                    }
                }
            }
        }
        expanded.push(Hypothesis {
            name: hypothesis.name.clone(),
            positive_questions: positives,
            negative_questions: hypothesis.negative_questions.clone(),
        });
    }
    Ok(Catalog::new(expanded)?)
}
