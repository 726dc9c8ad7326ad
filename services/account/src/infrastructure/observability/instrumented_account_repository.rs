//! 带日志和指标的账户仓储装饰器

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use bank_common::{PagedResult, Pagination, Sort};
use bank_errors::PersistenceResult;
use bank_ports::{PageableRepository, Repository};
use tracing::{Instrument, debug, info_span, warn};

use super::metrics::record_operation;
use crate::domain::entities::{Account, AccountId};
use crate::domain::repositories::AccountRepository;

/// 包装任意账户仓储，为每个操作记录 span、耗时和错误
pub struct InstrumentedAccountRepository<R> {
    backend: &'static str,
    inner: R,
}

impl<R: AccountRepository> InstrumentedAccountRepository<R> {
    pub fn new(backend: &'static str, inner: R) -> Self {
        Self { backend, inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    async fn observe<T, F>(&self, operation: &'static str, fut: F) -> PersistenceResult<T>
    where
        F: Future<Output = PersistenceResult<T>> + Send,
    {
        let span = info_span!("account_store", backend = self.backend, operation);
        let started = Instant::now();
        let result = fut.instrument(span).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => debug!(
                backend = self.backend,
                operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "Account store operation completed"
            ),
            Err(e) => warn!(
                backend = self.backend,
                operation,
                kind = e.kind(),
                error = %e,
                "Account store operation failed"
            ),
        }
        record_operation(self.backend, operation, elapsed, result.as_ref().err());
        result
    }
}

#[async_trait]
impl<R: AccountRepository> Repository<Account, AccountId>
    for InstrumentedAccountRepository<R>
{
    async fn save(&self, account: Account) -> PersistenceResult<Account> {
        self.observe("save", self.inner.save(account)).await
    }

    async fn find_by_id(&self, id: &AccountId) -> PersistenceResult<Option<Account>> {
        self.observe("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn find_all_by_id(&self, ids: &[AccountId]) -> PersistenceResult<Vec<Account>> {
        self.observe("find_all_by_id", self.inner.find_all_by_id(ids))
            .await
    }

    async fn exists_by_id(&self, id: &AccountId) -> PersistenceResult<bool> {
        self.observe("exists_by_id", self.inner.exists_by_id(id)).await
    }

    async fn delete_by_id(&self, id: &AccountId) -> PersistenceResult<()> {
        self.observe("delete_by_id", self.inner.delete_by_id(id)).await
    }

    async fn save_all(&self, accounts: Vec<Account>) -> PersistenceResult<Vec<Account>> {
        self.observe("save_all", self.inner.save_all(accounts)).await
    }

    async fn delete(&self, account: &Account) -> PersistenceResult<()> {
        self.observe("delete", self.inner.delete(account)).await
    }

    async fn delete_all_by_id(&self, ids: &[AccountId]) -> PersistenceResult<()> {
        self.observe("delete_all_by_id", self.inner.delete_all_by_id(ids))
            .await
    }
}

#[async_trait]
impl<R: AccountRepository> PageableRepository<Account, AccountId>
    for InstrumentedAccountRepository<R>
{
    async fn find_all_sorted(&self, sort: &Sort) -> PersistenceResult<Vec<Account>> {
        self.observe("find_all_sorted", self.inner.find_all_sorted(sort))
            .await
    }

    async fn find_page(
        &self,
        pagination: &Pagination,
        sort: &Sort,
    ) -> PersistenceResult<PagedResult<Account>> {
        self.observe("find_page", self.inner.find_page(pagination, sort))
            .await
    }

    async fn count(&self) -> PersistenceResult<u64> {
        self.observe("count", self.inner.count()).await
    }

    async fn delete_all(&self) -> PersistenceResult<()> {
        self.observe("delete_all", self.inner.delete_all()).await
    }

    async fn find_all(&self) -> PersistenceResult<Vec<Account>> {
        self.observe("find_all", self.inner.find_all()).await
    }
}
