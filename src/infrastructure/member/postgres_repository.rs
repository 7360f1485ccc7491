//! PostgreSQL member repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::member::{Member, MemberName, MemberRepository};

/// PostgreSQL implementation of MemberRepository
#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MEMBER_COLUMNS: &str = "member_name, email, password_hash, activated, activation_code, \
     tag, description, image_file, include_in_local_database, created_at, updated_at";

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn get(&self, name: &MemberName) -> Result<Option<Member>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_name = $1"
        ))
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to get member: {}", e)))?;

        row.as_ref().map(row_to_member).transpose()
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY member_name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list members: {}", e)))?;

        let mut members = Vec::with_capacity(rows.len());
        for row in &rows {
            members.push(row_to_member(row)?);
        }

        Ok(members)
    }

    async fn create(&self, member: Member) -> Result<Member, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (member_name, email, password_hash, activated, activation_code,
                                 tag, description, image_file, include_in_local_database,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(member.member_name().as_str())
        .bind(member.email())
        .bind(member.password_hash())
        .bind(member.is_activated())
        .bind(member.activation_code())
        .bind(member.tag())
        .bind(member.description())
        .bind(member.image_file())
        .bind(member.include_in_local_database())
        .bind(member.created_at())
        .bind(member.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create member: {}", e)))?;

        Ok(member)
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET email = $2, password_hash = $3, activated = $4, activation_code = $5,
                tag = $6, description = $7, image_file = $8, include_in_local_database = $9,
                updated_at = $10
            WHERE member_name = $1
            "#,
        )
        .bind(member.member_name().as_str())
        .bind(member.email())
        .bind(member.password_hash())
        .bind(member.is_activated())
        .bind(member.activation_code())
        .bind(member.tag())
        .bind(member.description())
        .bind(member.image_file())
        .bind(member.include_in_local_database())
        .bind(member.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update member: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Member '{}' not found",
                member.member_name()
            )));
        }

        Ok(member.clone())
    }
}

fn row_to_member(row: &sqlx::postgres::PgRow) -> Result<Member, DomainError> {
    let name: String = row.get("member_name");

    let member_name = MemberName::new(&name)
        .map_err(|e| DomainError::database(format!("Invalid member name in database: {}", e)))?;

    Ok(Member::from_parts(
        member_name,
        row.get("email"),
        row.get("password_hash"),
        row.get("activated"),
        row.get("activation_code"),
        row.get("tag"),
        row.get("description"),
        row.get("image_file"),
        row.get("include_in_local_database"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}
