//! Directory dei membri: chi appartiene a quale gruppo e con quali ruoli.

use async_trait::async_trait;
use bacheca_core::{Group, GroupId, Member, MemberId, MemberRole, Role};
use sqlx::{Row, SqlitePool};

use crate::error::{AppError, ResultExt};

/// Sorgente esterna di membri e ruoli. Gli errori vengono propagati senza modifiche.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Roster completo, in ordine deterministico.
    async fn list_members(&self) -> Result<Vec<Member>, AppError>;

    async fn get_member(&self, member_id: MemberId) -> Result<Member, AppError>;

    async fn list_roles(&self, member_id: MemberId) -> Result<Vec<MemberRole>, AppError>;

    /// Membri del gruppo, nell'ordine del roster.
    async fn list_members_of(&self, group_id: GroupId) -> Result<Vec<Member>, AppError> {
        let members = self.list_members().await?;
        Ok(members.into_iter().filter(|m| m.belongs_to(group_id)).collect())
    }
}

/// Directory sulle tabelle `members` e `member_roles`.
#[derive(Clone)]
pub struct SqliteDirectory {
    pool: SqlitePool,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add_group(&self, group: &Group) -> Result<(), AppError> {
        sqlx::query("INSERT INTO groups (group_id, name) VALUES (?, ?) ON CONFLICT(group_id) DO UPDATE SET name = excluded.name")
            .bind(group.group_id)
            .bind(&group.name)
            .execute(&self.pool)
            .await
            .with_context(|| format!("add group {}", group.group_id))?;
        Ok(())
    }

    pub async fn add_member(&self, member: &Member) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO members (member_id, name, group_id) VALUES (?, ?, ?) \
             ON CONFLICT(member_id) DO UPDATE SET name = excluded.name, group_id = excluded.group_id",
        )
        .bind(member.member_id)
        .bind(&member.name)
        .bind(member.group_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("add member {}", member.member_id))?;
        Ok(())
    }

    pub async fn set_role(&self, member_id: MemberId, role: Role, granted: bool) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO member_roles (member_id, role, granted) VALUES (?, ?, ?) \
             ON CONFLICT(member_id, role) DO UPDATE SET granted = excluded.granted",
        )
        .bind(member_id)
        .bind(role.as_str())
        .bind(granted)
        .execute(&self.pool)
        .await
        .with_context(|| format!("set role {} for member {}", role, member_id))?;
        Ok(())
    }
}

#[async_trait]
impl MembershipDirectory for SqliteDirectory {
    async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query("SELECT member_id, name, group_id FROM members ORDER BY member_id")
            .fetch_all(&self.pool)
            .await
            .context("list members")?;
        rows.iter()
            .map(|row| -> Result<Member, sqlx::Error> {
                Ok(Member {
                    member_id: row.try_get("member_id")?,
                    name: row.try_get("name")?,
                    group_id: row.try_get("group_id")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .context("list members")
    }

    async fn get_member(&self, member_id: MemberId) -> Result<Member, AppError> {
        let ctx = || format!("get member {}", member_id);
        let row = sqlx::query("SELECT member_id, name, group_id FROM members WHERE member_id = ?")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(ctx)?;
        let Some(row) = row else {
            return Err(AppError::NotFound.context(ctx()));
        };
        Ok(Member {
            member_id: row.try_get("member_id").with_context(ctx)?,
            name: row.try_get("name").with_context(ctx)?,
            group_id: row.try_get("group_id").with_context(ctx)?,
        })
    }

    async fn list_roles(&self, member_id: MemberId) -> Result<Vec<MemberRole>, AppError> {
        let ctx = || format!("list roles of member {}", member_id);
        let rows = sqlx::query("SELECT role, granted FROM member_roles WHERE member_id = ? ORDER BY role")
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .with_context(ctx)?;
        let mut roles = Vec::with_capacity(rows.len());
        for row in rows {
            let tag: String = row.try_get("role").with_context(ctx)?;
            // ruoli sconosciuti a questa versione non concedono nulla
            let Ok(role) = tag.parse::<Role>() else {
                tracing::debug!(member_id, role = %tag, "skipping unknown role");
                continue;
            };
            roles.push(MemberRole { member_id, role, granted: row.try_get("granted").with_context(ctx)? });
        }
        Ok(roles)
    }
}
