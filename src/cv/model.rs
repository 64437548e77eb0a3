//! CV document data model
//!
//! Field names serialize in camelCase so documents stay interchangeable with
//! the web editor's exports.

use crate::error::{CvEnhancerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Proficiency from 1 to 5
    pub level: u8,
}

/// A complete CV document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cv {
    pub id: String,
    pub title: String,
    /// RFC 3339 timestamp of the last write
    pub last_modified: String,
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
}

impl Cv {
    /// Refresh `last_modified` to the current time.
    pub fn touch(&mut self) {
        self.last_modified = chrono::Utc::now().to_rfc3339();
    }
}

/// Addresses one enhanceable free-text field inside a CV document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Summary,
    EducationDescription(usize),
    ExperienceDescription(usize),
}

impl FieldRef {
    /// Read the referenced text out of a document.
    pub fn get<'a>(&self, cv: &'a Cv) -> Result<&'a str> {
        match *self {
            FieldRef::Summary => Ok(&cv.personal_info.summary),
            FieldRef::EducationDescription(index) => cv
                .education
                .get(index)
                .map(|entry| entry.description.as_str())
                .ok_or_else(|| self.index_error(cv.education.len())),
            FieldRef::ExperienceDescription(index) => cv
                .experience
                .get(index)
                .map(|entry| entry.description.as_str())
                .ok_or_else(|| self.index_error(cv.experience.len())),
        }
    }

    /// Write text back into the referenced field.
    pub fn set(&self, cv: &mut Cv, text: String) -> Result<()> {
        match *self {
            FieldRef::Summary => {
                cv.personal_info.summary = text;
                Ok(())
            }
            FieldRef::EducationDescription(index) => {
                let len = cv.education.len();
                match cv.education.get_mut(index) {
                    Some(entry) => {
                        entry.description = text;
                        Ok(())
                    }
                    None => Err(self.index_error(len)),
                }
            }
            FieldRef::ExperienceDescription(index) => {
                let len = cv.experience.len();
                match cv.experience.get_mut(index) {
                    Some(entry) => {
                        entry.description = text;
                        Ok(())
                    }
                    None => Err(self.index_error(len)),
                }
            }
        }
    }

    fn index_error(&self, len: usize) -> CvEnhancerError {
        CvEnhancerError::InvalidInput(format!(
            "{} is out of range (document has {} entries)",
            self, len
        ))
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FieldRef::Summary => write!(f, "personalInfo.summary"),
            FieldRef::EducationDescription(index) => {
                write!(f, "education[{}].description", index)
            }
            FieldRef::ExperienceDescription(index) => {
                write!(f, "experience[{}].description", index)
            }
        }
    }
}

/// Builds a small in-memory document for tests.
#[cfg(test)]
pub(crate) fn sample_cv() -> Cv {
    Cv {
        id: "cv-1".to_string(),
        title: "Academic CV".to_string(),
        last_modified: "2024-01-01T00:00:00Z".to_string(),
        personal_info: PersonalInfo {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "London".to_string(),
            linkedin: None,
            website: None,
            summary: "Worked on analytical engines".to_string(),
        },
        education: vec![Education {
            id: "edu-1".to_string(),
            institution: "University of London".to_string(),
            degree: "BSc".to_string(),
            field_of_study: "Mathematics".to_string(),
            start_date: "1835".to_string(),
            end_date: "1839".to_string(),
            description: "Studied mathematics and logic".to_string(),
        }],
        experience: vec![Experience {
            id: "exp-1".to_string(),
            company: "Analytical Engine Project".to_string(),
            position: "Programmer".to_string(),
            location: "London".to_string(),
            start_date: "1842".to_string(),
            end_date: "1843".to_string(),
            description: "Wrote the first published program".to_string(),
        }],
        skills: vec![Skill {
            id: "skill-1".to_string(),
            name: "Mathematics".to_string(),
            level: 5,
        }],
    }
}
