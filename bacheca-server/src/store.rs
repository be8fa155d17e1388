//! Persistenza del messaggio del giorno: una riga per gruppo in `group_messages`.

use bacheca_core::{format_timestamp, now_utc, parse_timestamp, GroupId, GroupMessage, MemberId, MemberRef};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::{AppError, ResultExt};

/// Parametri di scrittura. `updated_at` non compare: lo imposta sempre lo store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertMessageParams {
    pub group_id: GroupId,
    pub text: String,
    pub source_url: Option<String>,
    pub updated_by: Option<MemberId>,
}

#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Legge il messaggio del gruppo risolvendo il nome dell'ultimo autore.
    pub async fn get(&self, group_id: GroupId) -> Result<GroupMessage, AppError> {
        let ctx = || format!("get group message {}", group_id);
        if group_id == 0 {
            return Err(AppError::Invalid.context(ctx()));
        }
        let row = sqlx::query(
            "SELECT gm.group_id, gm.message, gm.source_url, gm.updated_at, gm.updated_by, m.name AS updated_by_name \
             FROM group_messages gm \
             LEFT JOIN members m ON m.member_id = gm.updated_by \
             WHERE gm.group_id = ?",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(ctx)?;
        match row {
            Some(row) => message_from_row(&row).with_context(ctx),
            None => Err(AppError::NotFound.context(ctx())),
        }
    }

    /// Sostituisce l'intera riga del gruppo (nessun merge dei campi).
    pub async fn upsert(&self, arg: &UpsertMessageParams) -> Result<(), AppError> {
        let ctx = || format!("upsert group message {:?}", arg);
        if arg.group_id == 0 || arg.text.is_empty() {
            return Err(AppError::Invalid.context(ctx()));
        }
        let updated_at = format_timestamp(now_utc()).with_context(ctx)?;
        sqlx::query(
            "INSERT INTO group_messages (group_id, message, source_url, updated_at, updated_by) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(group_id) DO UPDATE SET \
                message = excluded.message, \
                source_url = excluded.source_url, \
                updated_at = excluded.updated_at, \
                updated_by = excluded.updated_by",
        )
        .bind(arg.group_id)
        .bind(&arg.text)
        .bind(&arg.source_url)
        .bind(&updated_at)
        .bind(arg.updated_by)
        .execute(&self.pool)
        .await
        .with_context(ctx)?;
        Ok(())
    }
}

fn message_from_row(row: &SqliteRow) -> Result<GroupMessage, AppError> {
    let updated_at: String = row.try_get("updated_at")?;
    let updated_by: Option<MemberId> = row.try_get("updated_by")?;
    let updated_by_name: Option<String> = row.try_get("updated_by_name")?;
    Ok(GroupMessage {
        group_id: row.try_get("group_id")?,
        text: row.try_get("message")?,
        source_url: row.try_get("source_url")?,
        updated_at: parse_timestamp(&updated_at)?,
        updated_by: updated_by.map(|member_id| MemberRef { member_id, name: updated_by_name }),
    })
}
