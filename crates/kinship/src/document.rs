//! Exchange format of a family tree
//!
//! The document keeps person attributes and relationships in two separate
//! maps keyed by person id:
//!
//! ```json
//! {
//!   "version": 1,
//!   "focusId": "c",
//!   "people": { "c": { "name": "Carla", "surnames": "Ruiz Gil", "gender": "female" } },
//!   "relationships": { "c": { "parents": [], "partners": [], "children": [], "siblings": [] } }
//! }
//! ```

use crate::{Gender, Person, PersonId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Latest document version this crate reads and writes
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access family document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed family document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported document version {0}, expected at most {max}", max = DOCUMENT_VERSION)]
    UnsupportedVersion(u32),

    #[error("focus {0} is not part of the document")]
    UnknownFocus(PersonId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default)]
    pub surnames: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    pub parents: Vec<PersonId>,
    #[serde(default)]
    pub partners: Vec<PersonId>,
    #[serde(default)]
    pub children: Vec<PersonId>,
    #[serde(default)]
    pub siblings: Vec<PersonId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDocument {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_id: Option<PersonId>,
    pub people: IndexMap<PersonId, PersonRecord>,
    #[serde(default)]
    pub relationships: IndexMap<PersonId, Relationships>,
}

impl FamilyDocument {
    /// Build a document from person records, keeping their order
    ///
    /// # Errors
    /// Returns an error if the focus is not one of the people
    pub fn from_people(people: &[Person], focus_id: Option<PersonId>) -> Result<Self, DocumentError> {
        if let Some(focus) = &focus_id {
            if !people.iter().any(|person| &person.id == focus) {
                return Err(DocumentError::UnknownFocus(focus.clone()));
            }
        }

        let mut document = Self {
            version: DOCUMENT_VERSION,
            focus_id,
            people: IndexMap::with_capacity(people.len()),
            relationships: IndexMap::with_capacity(people.len()),
        };

        for person in people {
            document.people.insert(
                person.id.clone(),
                PersonRecord {
                    name: person.name.clone(),
                    surnames: person.surnames.clone(),
                    gender: person.gender,
                    photo: person.photo.clone(),
                },
            );
            document.relationships.insert(
                person.id.clone(),
                Relationships {
                    parents: person.parents.clone(),
                    partners: person.partners.clone(),
                    children: person.children.clone(),
                    siblings: person.siblings.clone(),
                },
            );
        }

        Ok(document)
    }

    /// Person records in document order
    ///
    /// People without an entry in the relationship map have no relatives.
    pub fn people(&self) -> Vec<Person> {
        for id in self.relationships.keys() {
            if !self.people.contains_key(id) {
                warn!("Relationships recorded for unknown person {id}");
            }
        }

        self.people
            .iter()
            .map(|(id, record)| {
                let relationships = self.relationships.get(id).cloned().unwrap_or_default();
                Person {
                    id: id.clone(),
                    name: record.name.clone(),
                    surnames: record.surnames.clone(),
                    gender: record.gender,
                    photo: record.photo.clone(),
                    partners: relationships.partners,
                    parents: relationships.parents,
                    children: relationships.children,
                    siblings: relationships.siblings,
                }
            })
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        if document.version > DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion(document.version));
        }
        debug!(
            "Parsed document v{} with {} people",
            document.version,
            document.people.len()
        );
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const SAMPLE: &str = r#"{
        "version": 1,
        "focusId": "c",
        "people": {
            "a": { "name": "Antonio", "surnames": "Ruiz", "gender": "male" },
            "b": { "name": "Beatriz", "surnames": "Gil", "gender": "F", "photo": "b.jpg" },
            "c": { "name": "Carla", "surnames": "Ruiz Gil", "gender": "female" }
        },
        "relationships": {
            "a": { "partners": ["b"], "children": ["c"] },
            "b": { "partners": ["a"], "children": ["c"] },
            "c": { "parents": ["a", "b"] }
        }
    }"#;

    #[test]
    fn parses_people_in_order() {
        let document = FamilyDocument::from_json(SAMPLE).unwrap();
        assert_eq!(document.focus_id, Some(PersonId::from("c")));

        let people = document.people();
        let ids: Vec<_> = people.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        assert_eq!(people[1].gender, Gender::Female);
        assert_eq!(people[1].photo.as_deref(), Some("b.jpg"));
        assert_eq!(people[2].parents, vec![PersonId::from("a"), PersonId::from("b")]);
        assert!(people[2].siblings.is_empty());
    }

    #[test]
    fn people_survive_export() {
        let people = FamilyDocument::from_json(SAMPLE).unwrap().people();
        let document = FamilyDocument::from_people(&people, Some("a".into())).unwrap();
        let reparsed = FamilyDocument::from_json(&document.to_json().unwrap()).unwrap();

        assert_eq!(reparsed.people(), people);
        assert_eq!(reparsed.focus_id, Some(PersonId::from("a")));
    }

    #[test]
    fn missing_relationships_mean_no_relatives() {
        let json = r#"{ "version": 1, "people": { "x": { "name": "Xavi", "gender": "M" } } }"#;
        let people = FamilyDocument::from_json(json).unwrap().people();

        assert_eq!(people.len(), 1);
        assert_eq!(people[0].gender, Gender::Male);
        assert!(people[0].parents.is_empty());
        assert!(people[0].surnames.is_empty());
    }

    #[test]
    fn rejects_newer_versions() {
        let json = r#"{ "version": 7, "people": {} }"#;
        assert!(matches!(
            FamilyDocument::from_json(json),
            Err(DocumentError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn rejects_unknown_focus() {
        let people = vec![Person::new("a", "Ana", Gender::Female)];
        assert!(matches!(
            FamilyDocument::from_people(&people, Some("z".into())),
            Err(DocumentError::UnknownFocus(_))
        ));
    }

    #[test]
    fn save_and_load() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let document = FamilyDocument::from_json(SAMPLE).unwrap();

        document.save(file.path()).unwrap();
        assert_eq!(FamilyDocument::load(file.path()).unwrap(), document);
    }
}
