use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::invariants::validate_genre;
use crate::domain::category::CategoryID;
use crate::domain::entity::{define_identifier, AggregateRoot, Entity};
use crate::domain::validation::ValidationHandler;
use crate::domain::DomainResult;

define_identifier!(
    /// Identity of a genre
    GenreID
);

/// Genre, optionally tied to categories (membership only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    id: GenreID,
    name: Option<String>,
    active: bool,
    categories: BTreeSet<CategoryID>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Genre {
    pub fn new_genre(name: Option<String>, active: bool) -> DomainResult<Self> {
        let now = Utc::now();
        let genre = Self {
            id: GenreID::unique(),
            name,
            active,
            categories: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            deleted_at: if active { None } else { Some(now) },
        };
        genre.self_validate()?;
        Ok(genre)
    }

    pub fn update(
        &mut self,
        name: Option<String>,
        active: bool,
        categories: impl IntoIterator<Item = CategoryID>,
    ) -> DomainResult<()> {
        let mut next = self.clone();
        next.name = name;
        next.categories = categories.into_iter().collect();
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

    pub fn add_category(&mut self, category_id: CategoryID) {
        if self.categories.insert(category_id) {
            self.updated_at = Utc::now();
        }
    }

    pub fn remove_category(&mut self, category_id: &CategoryID) {
        if self.categories.remove(category_id) {
            self.updated_at = Utc::now();
        }
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

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn categories(&self) -> &BTreeSet<CategoryID> {
        &self.categories
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl Entity for Genre {
    type Id = GenreID;

    fn id(&self) -> &GenreID {
        &self.id
    }

    fn validate(&self, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
        validate_genre(self, handler)
    }
}

impl AggregateRoot for Genre {
    const NAME: &'static str = "Genre";
}
