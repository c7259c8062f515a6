//! Project file validation.
//!
//! Checks that every case is well-formed and converts; whether a case is physically
//! solvable is the calculator's question.

use crate::schema::{CURRENT_VERSION, ProjectFile};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version} (newest supported is {CURRENT_VERSION})")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &ProjectFile) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > CURRENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut ids = HashSet::new();
    for case in &project.cases {
        if case.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "cases.id".to_string(),
                value: format!("{:?}", case.id),
                reason: "case id must not be empty".to_string(),
            });
        }
        if !ids.insert(case.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: case.id.clone(),
                context: "cases".to_string(),
            });
        }
        case.cycle_mode()?;
        case.to_configuration()?;
    }
    Ok(())
}
