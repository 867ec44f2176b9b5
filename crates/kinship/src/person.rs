use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a person record
#[derive(Debug, Display, From, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "M")]
    Male,
    #[serde(alias = "F")]
    Female,
}

/// A node of the family graph, as owned by the surrounding store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Space separated, order is significant
    pub surnames: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub partners: Vec<PersonId>,
    #[serde(default)]
    pub parents: Vec<PersonId>,
    #[serde(default)]
    pub children: Vec<PersonId>,
    #[serde(default)]
    pub siblings: Vec<PersonId>,
}

impl Person {
    /// Create a person without any relationship
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surnames: String::new(),
            gender,
            photo: None,
            partners: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            siblings: Vec::new(),
        }
    }

    pub fn with_surnames(mut self, surnames: impl Into<String>) -> Self {
        self.surnames = surnames.into();
        self
    }

    pub fn with_parents<I, T>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PersonId>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PersonId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_partners<I, T>(mut self, partners: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PersonId>,
    {
        self.partners = partners.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_siblings<I, T>(mut self, siblings: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PersonId>,
    {
        self.siblings = siblings.into_iter().map(Into::into).collect();
        self
    }

    /// Name followed by surnames, e.g. for plain-text output
    pub fn full_name(&self) -> String {
        if self.surnames.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.surnames)
        }
    }
}
