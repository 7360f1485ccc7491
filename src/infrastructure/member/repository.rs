//! In-memory member repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::member::{Member, MemberName, MemberRepository};

/// In-memory implementation of MemberRepository, used for tests and for
/// running the portal without a database
#[derive(Debug, Default, Clone)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<HashMap<String, Member>>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn get(&self, name: &MemberName) -> Result<Option<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(members.get(name.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let members = self.members.read().await;
        let mut all: Vec<Member> = members.values().cloned().collect();
        all.sort_by(|a, b| a.member_name().as_str().cmp(b.member_name().as_str()));
        Ok(all)
    }

    async fn create(&self, member: Member) -> Result<Member, DomainError> {
        let mut members = self.members.write().await;
        let name = member.member_name().as_str().to_string();

        if members.contains_key(&name) {
            return Err(DomainError::validation(format!(
                "Member '{}' already exists",
                name
            )));
        }

        members.insert(name, member.clone());
        Ok(member)
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let mut members = self.members.write().await;
        let name = member.member_name().as_str().to_string();

        if !members.contains_key(&name) {
            return Err(DomainError::not_found(format!(
                "Member '{}' not found",
                name
            )));
        }

        members.insert(name, member.clone());
        Ok(member.clone())
    }
}
