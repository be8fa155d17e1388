#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use bacheca_core::{Group, GroupId, Member, MemberId, MemberRole, Role};
use bacheca_server::directory::{MembershipDirectory, SqliteDirectory};
use bacheca_server::fetcher::{FetchResponse, RemoteFetcher};
use bacheca_server::store::MessageStore;
use bacheca_server::{connect_pool, run_migrations, sqlite_url_for_path, AppError, MessageService};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// DB su file temporaneo con migrazioni applicate. Il TempDir va tenuto vivo dal test.
pub struct Fixture {
    pub td: TempDir,
    pub pool: SqlitePool,
    pub directory: SqliteDirectory,
    pub store: MessageStore,
}

impl Fixture {
    pub async fn new() -> Result<Self> {
        let td = TempDir::new()?;
        let url = sqlite_url_for_path(&td.path().join("bacheca.db"))?;
        let pool = connect_pool(&url).await?;
        run_migrations(&pool).await?;
        Ok(Self {
            td,
            directory: SqliteDirectory::new(pool.clone()),
            store: MessageStore::new(pool.clone()),
            pool,
        })
    }

    pub fn service(&self, fetcher: Arc<dyn RemoteFetcher>) -> MessageService {
        MessageService::new(self.store.clone(), Arc::new(self.directory.clone()), fetcher)
    }

    pub async fn create_group(&self, group_id: GroupId) -> Result<()> {
        self.directory.add_group(&Group { group_id, name: format!("Group {}", group_id) }).await?;
        Ok(())
    }

    pub async fn create_member(&self, member_id: MemberId, group_id: Option<GroupId>) -> Result<Member> {
        let member = Member { member_id, name: format!("Member {}", member_id), group_id };
        self.directory.add_member(&member).await?;
        Ok(member)
    }

    pub async fn create_director(&self, member_id: MemberId, group_id: GroupId) -> Result<Member> {
        let member = self.create_member(member_id, Some(group_id)).await?;
        self.directory.set_role(member_id, Role::Director, true).await?;
        Ok(member)
    }
}

/// Fetcher che non deve mai essere chiamato.
pub struct NoFetcher;

#[async_trait]
impl RemoteFetcher for NoFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, AppError> {
        panic!("unexpected fetch of {}", url)
    }
}

/// Directory che fallisce sempre, per verificare la propagazione degli errori.
pub struct BrokenDirectory;

#[async_trait]
impl MembershipDirectory for BrokenDirectory {
    async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn get_member(&self, _member_id: MemberId) -> Result<Member, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn list_roles(&self, _member_id: MemberId) -> Result<Vec<MemberRole>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}

/// Directory che risponde in ritardo, per interrompere un'operazione a metà.
pub struct SlowDirectory {
    pub inner: SqliteDirectory,
    pub delay: std::time::Duration,
}

#[async_trait]
impl MembershipDirectory for SlowDirectory {
    async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_members().await
    }

    async fn get_member(&self, member_id: MemberId) -> Result<Member, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_member(member_id).await
    }

    async fn list_roles(&self, member_id: MemberId) -> Result<Vec<MemberRole>, AppError> {
        self.inner.list_roles(member_id).await
    }
}
