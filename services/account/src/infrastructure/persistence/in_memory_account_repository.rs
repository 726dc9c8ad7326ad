//! 内存账户仓储实现
//!
//! 用于测试和 `memory` 后端，每个操作持有一次锁

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use bank_common::{PagedResult, Pagination, Sort};
use bank_errors::{PersistenceError, PersistenceResult};
use bank_ports::{PageableRepository, Repository};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Account, AccountId};
use crate::domain::repositories::{AccountSort, validate_pagination};

#[derive(Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    /// 已分配的最大 ID
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: RwLock<State>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按 ID 顺序返回排序后的全部账户
    async fn sorted(&self, sort: &AccountSort) -> Vec<Account> {
        let state = self.state.read().await;
        let mut accounts: Vec<Account> = state.accounts.values().cloned().collect();
        // 稳定排序，相等元素保持 ID 升序
        accounts.sort_by(|a, b| sort.compare(a, b));
        accounts
    }
}

#[async_trait]
impl Repository<Account, AccountId> for InMemoryAccountRepository {
    async fn save(&self, mut account: Account) -> PersistenceResult<Account> {
        let mut state = self.state.write().await;
        let id = match account.id {
            Some(id) => {
                state.last_id = state.last_id.max(id.0);
                id
            }
            None => {
                state.last_id = state
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| PersistenceError::internal("Account id sequence exhausted"))?;
                AccountId(state.last_id)
            }
        };
        account.id = Some(id);
        state.accounts.insert(id, account.clone());
        debug!(account_id = %id, "Account saved");
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> PersistenceResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(id).cloned())
    }

    async fn find_all_by_id(&self, ids: &[AccountId]) -> PersistenceResult<Vec<Account>> {
        let wanted: BTreeSet<&AccountId> = ids.iter().collect();
        let state = self.state.read().await;
        Ok(wanted
            .into_iter()
            .filter_map(|id| state.accounts.get(id).cloned())
            .collect())
    }

    async fn exists_by_id(&self, id: &AccountId) -> PersistenceResult<bool> {
        Ok(self.state.read().await.accounts.contains_key(id))
    }

    async fn delete_by_id(&self, id: &AccountId) -> PersistenceResult<()> {
        if self.state.write().await.accounts.remove(id).is_some() {
            debug!(account_id = %id, "Account deleted");
        }
        Ok(())
    }

    async fn delete_all_by_id(&self, ids: &[AccountId]) -> PersistenceResult<()> {
        let mut state = self.state.write().await;
        for id in ids {
            state.accounts.remove(id);
        }
        Ok(())
    }
}

#[async_trait]
impl PageableRepository<Account, AccountId> for InMemoryAccountRepository {
    async fn find_all_sorted(&self, sort: &Sort) -> PersistenceResult<Vec<Account>> {
        let sort = AccountSort::parse(sort)?;
        Ok(self.sorted(&sort).await)
    }

    async fn find_page(
        &self,
        pagination: &Pagination,
        sort: &Sort,
    ) -> PersistenceResult<PagedResult<Account>> {
        validate_pagination(pagination)?;
        let sort = AccountSort::parse(sort)?;

        let accounts = self.sorted(&sort).await;
        let total = accounts.len() as u64;
        let items = accounts
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(PagedResult::new(items, total, pagination))
    }

    async fn count(&self) -> PersistenceResult<u64> {
        Ok(self.state.read().await.accounts.len() as u64)
    }

    async fn delete_all(&self) -> PersistenceResult<()> {
        self.state.write().await.accounts.clear();
        Ok(())
    }
}
