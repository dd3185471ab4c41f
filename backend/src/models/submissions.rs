//! Records submitted by site visitors: registrations, applications and enquiries.

use serde::{Deserialize, Serialize};

use super::document::{Collection, Resource};
use super::validation::{optional_email, require, require_email, ValidationError};

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

/// A registered site user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Resource for User {
    const COLLECTION: Collection = Collection::Users;
    const LABEL: &'static str = "User";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email("email", &self.email)
    }
}

/// An application for one of the advertised jobs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Link to the uploaded resume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl Resource for JobApplication {
    const COLLECTION: Collection = Collection::JobApplications;
    const LABEL: &'static str = "Job application";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email("email", &self.email)
    }
}

/// An admission enquiry for a prospective student.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Grade applied for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl Resource for Admission {
    const COLLECTION: Collection = Collection::Admissions;
    const LABEL: &'static str = "Admission";

    fn validate(&self) -> Result<(), ValidationError> {
        require("studentName", &self.student_name)?;
        require("parentName", &self.parent_name)?;
        require("phone", &self.phone)?;
        optional_email("email", self.email.as_deref())
    }
}

/// A parent's contact record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Resource for Parent {
    const COLLECTION: Collection = Collection::Parents;
    const LABEL: &'static str = "Parent";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        optional_email("email", self.email.as_deref())
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Resource for Contact {
    const COLLECTION: Collection = Collection::Contacts;
    const LABEL: &'static str = "Contact";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email("email", &self.email)?;
        require("message", &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn map(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_application_status_defaults_to_pending() {
        let app = JobApplication::from_fields(map(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "jobId": "j1"
        })))
        .unwrap();
        assert_eq!(app.status, SubmissionStatus::Pending);
        assert_eq!(app.to_fields().unwrap()["status"], "pending");
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let err = Admission::from_fields(map(json!({
            "studentName": "Ravi",
            "parentName": "Meena",
            "phone": "555",
            "status": "maybe"
        })))
        .unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_admission_reports_first_missing_field_in_camel_case() {
        let err = Admission::from_fields(map(json!({"studentName": "Ravi"}))).unwrap_err();
        assert_eq!(err.to_string(), "parentName is required");
    }

    #[test]
    fn test_contact_requires_valid_email() {
        let err = Contact::from_fields(map(json!({
            "name": "N",
            "email": "nope",
            "message": "hi"
        })))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "email", .. }));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let parent = Parent::from_fields(map(json!({"name": "P", "shoeSize": 42}))).unwrap();
        assert!(!parent.to_fields().unwrap().contains_key("shoeSize"));
    }
}
