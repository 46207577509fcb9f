use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::invariants::validate_category;
use crate::domain::entity::{define_identifier, AggregateRoot, Entity};
use crate::domain::validation::ValidationHandler;
use crate::domain::DomainResult;

define_identifier!(
    /// Identity of a category
    CategoryID
);

/// Catalog grouping (e.g. "Movies", "Documentaries")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryID,
    name: Option<String>,
    description: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new_category(
        name: Option<String>,
        description: Option<String>,
        active: bool,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let category = Self {
            id: CategoryID::unique(),
            name,
            description,
            active,
            created_at: now,
            updated_at: now,
            deleted_at: if active { None } else { Some(now) },
        };
        category.self_validate()?;
        Ok(category)
    }

    /// Replace the editable fields; nothing changes when validation fails
    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        active: bool,
    ) -> DomainResult<()> {
        let mut next = self.clone();
        next.name = name;
        next.description = description;
        if active {
            next.activate();
        } else {
            next.deactivate();
        }
        next.updated_at = Utc::now();
        next.self_validate()?;
        *self = next;
        Ok(())
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn raw_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl Entity for Category {
    type Id = CategoryID;

    fn id(&self) -> &CategoryID {
        &self.id
    }

    fn validate(&self, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
        validate_category(self, handler)
    }
}

impl AggregateRoot for Category {
    const NAME: &'static str = "Category";
}
