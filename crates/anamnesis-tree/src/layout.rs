//! Declarative tree layout.

use std::path::Path;

use anamnesis_core::errors::{AnamnesisResult, StoreError};
use serde::{Deserialize, Serialize};

/// One question nested directly under another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBranch {
    pub question: String,
    pub child_question: String,
}

/// A group nested under a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBranch {
    pub question: String,
    pub group: String,
}

/// Membership of a question in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupQuestion {
    pub group: String,
    pub question: String,
}

/// Flat branch declarations from which a [`crate::QuestionTree`] is built.
///
/// Rows may arrive in any order; nesting is resolved recursively starting
/// from the root-level questions and groups, and rows that no placement
/// ever reaches are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLayout {
    pub question_branches: Vec<QuestionBranch>,
    pub group_branches: Vec<GroupBranch>,
    pub group_questions: Vec<GroupQuestion>,
    pub general_questions: Vec<String>,
    pub general_groups: Vec<String>,
}

impl TreeLayout {
    pub fn from_json_str(text: &str) -> AnamnesisResult<Self> {
        let layout: TreeLayout = serde_json::from_str(text).map_err(StoreError::from)?;
        Ok(layout)
    }

    pub fn load(path: impl AsRef<Path>) -> AnamnesisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(StoreError::from)?;
        Self::from_json_str(&text)
    }
}
