use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::invariants::validate_cast_member;
use crate::domain::entity::{define_identifier, AggregateRoot, Entity};
use crate::domain::validation::ValidationHandler;
use crate::domain::DomainResult;

define_identifier!(
    /// Identity of a cast member
    CastMemberID
);

/// A person credited on videos.
///
/// Name and type arrive from administrative input and may be missing; a
/// constructed aggregate always has both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    id: CastMemberID,
    name: Option<String>,
    member_type: Option<CastMemberType>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CastMemberType {
    Actor,
    Director,
}

impl CastMember {
    /// Create a new cast member, failing with every violated rule
    pub fn new_member(
        name: Option<String>,
        member_type: Option<CastMemberType>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let member = Self {
            id: CastMemberID::unique(),
            name,
            member_type,
            created_at: now,
            updated_at: now,
        };
        member.self_validate()?;
        Ok(member)
    }

    /// Replace name and type; the aggregate is left untouched on failure
    pub fn update(
        &mut self,
        name: Option<String>,
        member_type: Option<CastMemberType>,
    ) -> DomainResult<()> {
        let mut next = self.clone();
        next.name = name;
        next.member_type = member_type;
        next.updated_at = Utc::now();
        next.self_validate()?;
        *self = next;
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn raw_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn member_type(&self) -> Option<CastMemberType> {
        self.member_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for CastMember {
    type Id = CastMemberID;

    fn id(&self) -> &CastMemberID {
        &self.id
    }

    fn validate(&self, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
        validate_cast_member(self, handler)
    }
}

impl AggregateRoot for CastMember {
    const NAME: &'static str = "CastMember";
}

impl std::fmt::Display for CastMemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastMemberType::Actor => write!(f, "ACTOR"),
            CastMemberType::Director => write!(f, "DIRECTOR"),
        }
    }
}
