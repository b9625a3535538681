//! Interview templates: which interviewers sit on a panel and for how long.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTemplate {
    pub id: u64,
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub interviewer_ids: Vec<u64>,
}

/// In-memory lookup of templates by id.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<u64, InterviewTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: impl IntoIterator<Item = InterviewTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// # Errors
    /// Returns `SlotError::NotFound` for an unknown id.
    pub fn get(&self, id: u64) -> Result<&InterviewTemplate> {
        self.templates.get(&id).ok_or(SlotError::NotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterviewTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
