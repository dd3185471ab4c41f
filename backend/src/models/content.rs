//! Published content: events, jobs, activities and the home page counters.

use serde::{Deserialize, Serialize};

use super::document::{Collection, Resource};
use super::validation::{require, ValidationError};

/// A school event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-form date as entered by staff (usually ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Shown in the highlights strip instead of the general listing.
    #[serde(default)]
    pub highlighted: bool,
}

impl Resource for Event {
    const COLLECTION: Collection = Collection::Events;
    const LABEL: &'static str = "Event";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}

/// An open position at the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Job {
    fn default() -> Self {
        Self {
            title: String::new(),
            department: None,
            description: None,
            location: None,
            employment_type: None,
            requirements: Vec::new(),
            is_active: true,
        }
    }
}

impl Resource for Job {
    const COLLECTION: Collection = Collection::Jobs;
    const LABEL: &'static str = "Job";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}

/// A co-curricular activity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Resource for Activity {
    const COLLECTION: Collection = Collection::Activities;
    const LABEL: &'static str = "Activity";

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}

/// Counters shown on the home page. Stored as a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    #[serde(default)]
    pub students: u32,
    #[serde(default)]
    pub teachers: u32,
    #[serde(default)]
    pub years_of_excellence: u32,
    #[serde(default)]
    pub awards: u32,
}

impl Resource for HomeStats {
    const COLLECTION: Collection = Collection::HomeStats;
    const LABEL: &'static str = "Home stats";

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
