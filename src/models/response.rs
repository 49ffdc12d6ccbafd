use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Body returned by `POST /extract-skills`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

impl SkillsResponse {
    pub fn new(skills: BTreeSet<String>) -> Self {
        Self {
            skills: skills.into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub skills_loaded: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
    pub request_id: String,
    pub timestamp: String,
}
