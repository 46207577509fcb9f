// src/repositories/relation_repository.rs
//
// Stores for the aggregates a Video refers to by id.
// The video core only needs to know which ids exist.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use crate::domain::{CastMember, CastMemberID, Category, CategoryID, Entity, Genre, GenreID};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait CategoryGateway: Send + Sync {
    fn create(&self, category: Category) -> AppResult<Category>;
    fn find_by_id(&self, id: &CategoryID) -> AppResult<Option<Category>>;
    /// The subset of `ids` that exist
    fn exists_by_ids(&self, ids: &[CategoryID]) -> AppResult<Vec<CategoryID>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait GenreGateway: Send + Sync {
    fn create(&self, genre: Genre) -> AppResult<Genre>;
    fn find_by_id(&self, id: &GenreID) -> AppResult<Option<Genre>>;
    /// The subset of `ids` that exist
    fn exists_by_ids(&self, ids: &[GenreID]) -> AppResult<Vec<GenreID>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CastMemberGateway: Send + Sync {
    fn create(&self, member: CastMember) -> AppResult<CastMember>;
    fn find_by_id(&self, id: &CastMemberID) -> AppResult<Option<CastMember>>;
    /// The subset of `ids` that exist
    fn exists_by_ids(&self, ids: &[CastMemberID]) -> AppResult<Vec<CastMemberID>>;
}

/// Map-backed store shared by the relation gateways
pub struct InMemoryStore<A: Entity> {
    items: RwLock<HashMap<A::Id, A>>,
    entity_name: &'static str,
}

impl<A> InMemoryStore<A>
where
    A: Entity + Clone,
    A::Id: Hash,
{
    fn named(entity_name: &'static str) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            entity_name,
        }
    }

    fn insert(&self, item: A) -> AppResult<A> {
        let mut items = self.items.write().unwrap_or_else(|p| p.into_inner());
        if items.contains_key(item.id()) {
            return Err(AppError::Conflict(format!(
                "{} with ID {} already exists",
                self.entity_name,
                item.id()
            )));
        }
        items.insert(item.id().clone(), item.clone());
        Ok(item)
    }

    fn get(&self, id: &A::Id) -> Option<A> {
        self.items
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(id)
            .cloned()
    }

    fn existing(&self, ids: &[A::Id]) -> Vec<A::Id> {
        let items = self.items.read().unwrap_or_else(|p| p.into_inner());
        ids.iter().filter(|id| items.contains_key(id)).cloned().collect()
    }
}

pub type InMemoryCategoryGateway = InMemoryStore<Category>;
pub type InMemoryGenreGateway = InMemoryStore<Genre>;
pub type InMemoryCastMemberGateway = InMemoryStore<CastMember>;

impl Default for InMemoryStore<Category> {
    fn default() -> Self {
        Self::named("Category")
    }
}

impl Default for InMemoryStore<Genre> {
    fn default() -> Self {
        Self::named("Genre")
    }
}

impl Default for InMemoryStore<CastMember> {
    fn default() -> Self {
        Self::named("CastMember")
    }
}

impl CategoryGateway for InMemoryStore<Category> {
    fn create(&self, category: Category) -> AppResult<Category> {
        self.insert(category)
    }

    fn find_by_id(&self, id: &CategoryID) -> AppResult<Option<Category>> {
        Ok(self.get(id))
    }

    fn exists_by_ids(&self, ids: &[CategoryID]) -> AppResult<Vec<CategoryID>> {
        Ok(self.existing(ids))
    }
}

impl GenreGateway for InMemoryStore<Genre> {
    fn create(&self, genre: Genre) -> AppResult<Genre> {
        self.insert(genre)
    }

    fn find_by_id(&self, id: &GenreID) -> AppResult<Option<Genre>> {
        Ok(self.get(id))
    }

    fn exists_by_ids(&self, ids: &[GenreID]) -> AppResult<Vec<GenreID>> {
        Ok(self.existing(ids))
    }
}

impl CastMemberGateway for InMemoryStore<CastMember> {
    fn create(&self, member: CastMember) -> AppResult<CastMember> {
        self.insert(member)
    }

    fn find_by_id(&self, id: &CastMemberID) -> AppResult<Option<CastMember>> {
        Ok(self.get(id))
    }

    fn exists_by_ids(&self, ids: &[CastMemberID]) -> AppResult<Vec<CastMemberID>> {
        Ok(self.existing(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CastMemberType;

    #[test]
    fn test_exists_by_ids_returns_only_known_ids() {
        let gateway = InMemoryCategoryGateway::default();
        let category = gateway
            .create(Category::new_category(Some("Movies".to_string()), None, true).unwrap())
            .unwrap();

        let missing = CategoryID::from("missing");
        let found = gateway
            .exists_by_ids(&[category.id().clone(), missing])
            .unwrap();
        assert_eq!(found, vec![category.id().clone()]);
    }

    #[test]
    fn test_duplicate_create_conflicts() {
        let gateway = InMemoryCastMemberGateway::default();
        let member = CastMember::new_member(Some("Vin Diesel".to_string()), Some(CastMemberType::Actor))
            .unwrap();
        gateway.create(member.clone()).unwrap();

        match gateway.create(member) {
            Err(AppError::Conflict(message)) => assert!(message.starts_with("CastMember")),
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_find_genre() {
        let gateway = InMemoryGenreGateway::default();
        let genre = gateway
            .create(Genre::new_genre(Some("Action".to_string()), true).unwrap())
            .unwrap();
        assert_eq!(gateway.find_by_id(genre.id()).unwrap(), Some(genre));
        assert_eq!(gateway.find_by_id(&GenreID::from("x")).unwrap(), None);
    }
}
