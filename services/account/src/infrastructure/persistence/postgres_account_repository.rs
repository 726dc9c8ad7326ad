//! PostgreSQL 账户仓储实现

use async_trait::async_trait;
use bank_adapter_postgres::map_sqlx_error;
use bank_common::{PagedResult, Pagination, Sort};
use bank_domain_core::{Currency, Money};
use bank_errors::PersistenceResult;
use bank_ports::{PageableRepository, Repository};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::entities::{Account, AccountId};
use crate::domain::repositories::{AccountSort, validate_pagination};

const SELECT_COLUMNS: &str = "SELECT id, holder_name, balance_amount, balance_currency FROM accounts";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, account: &Account) -> PersistenceResult<Account> {
        sqlx::query_as::<_, AccountRow>(
            "INSERT INTO accounts (holder_name, balance_amount, balance_currency)
             VALUES ($1, $2, $3)
             RETURNING id, holder_name, balance_amount, balance_currency",
        )
        .bind(&account.holder_name)
        .bind(account.balance.amount)
        .bind(account.balance.currency.code())
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(|e| map_sqlx_error("Failed to insert account", e))
    }

    /// 按指定 ID 写入，并把序列推进到该 ID 之后
    async fn upsert(&self, id: AccountId, account: &Account) -> PersistenceResult<Account> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin transaction", e))?;

        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO accounts (id, holder_name, balance_amount, balance_currency)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE
             SET holder_name = EXCLUDED.holder_name,
                 balance_amount = EXCLUDED.balance_amount,
                 balance_currency = EXCLUDED.balance_currency
             RETURNING id, holder_name, balance_amount, balance_currency",
        )
        .bind(id.0)
        .bind(&account.holder_name)
        .bind(account.balance.amount)
        .bind(account.balance.currency.code())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to save account", e))?;

        sqlx::query(
            "SELECT setval('accounts_id_seq', $1, true)
             WHERE $1 >= (SELECT last_value FROM accounts_id_seq)",
        )
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to advance account id sequence", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit account", e))?;

        Ok(row.into())
    }
}

#[async_trait]
impl Repository<Account, AccountId> for PostgresAccountRepository {
    async fn save(&self, account: Account) -> PersistenceResult<Account> {
        let saved = match account.id {
            Some(id) => self.upsert(id, &account).await?,
            None => self.insert(&account).await?,
        };
        debug!(account_id = ?saved.id, "Account saved");
        Ok(saved)
    }

    async fn find_by_id(&self, id: &AccountId) -> PersistenceResult<Option<Account>> {
        sqlx::query_as::<_, AccountRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Into::into))
            .map_err(|e| map_sqlx_error("Failed to find account", e))
    }

    async fn find_all_by_id(&self, ids: &[AccountId]) -> PersistenceResult<Vec<Account>> {
        let ids: Vec<i64> = ids.iter().map(AccountId::value).collect();
        sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE id = ANY($1) ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(Into::into).collect())
        .map_err(|e| map_sqlx_error("Failed to find accounts by id", e))
    }

    async fn exists_by_id(&self, id: &AccountId) -> PersistenceResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to check account", e))?;

        Ok(result.0)
    }

    async fn delete_by_id(&self, id: &AccountId) -> PersistenceResult<()> {
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete account", e))?;

        Ok(())
    }

    async fn delete_all_by_id(&self, ids: &[AccountId]) -> PersistenceResult<()> {
        let ids: Vec<i64> = ids.iter().map(AccountId::value).collect();
        sqlx::query("DELETE FROM accounts WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete accounts", e))?;

        Ok(())
    }
}

#[async_trait]
impl PageableRepository<Account, AccountId> for PostgresAccountRepository {
    async fn find_all_sorted(&self, sort: &Sort) -> PersistenceResult<Vec<Account>> {
        // ORDER BY 只由白名单列拼接
        let order_by = AccountSort::parse(sort)?.to_order_by();

        sqlx::query_as::<_, AccountRow>(&format!("{} {}", SELECT_COLUMNS, order_by))
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(|e| map_sqlx_error("Failed to list accounts", e))
    }

    async fn find_page(
        &self,
        pagination: &Pagination,
        sort: &Sort,
    ) -> PersistenceResult<PagedResult<Account>> {
        validate_pagination(pagination)?;
        let order_by = AccountSort::parse(sort)?.to_order_by();

        let items = sqlx::query_as::<_, AccountRow>(&format!(
            "{} {} LIMIT $1 OFFSET $2",
            SELECT_COLUMNS, order_by
        ))
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list accounts", e))?
        .into_iter()
        .map(Into::into)
        .collect();

        let total = self.count().await?;
        Ok(PagedResult::new(items, total, pagination))
    }

    async fn count(&self) -> PersistenceResult<u64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count accounts", e))?;

        Ok(result.0.max(0) as u64)
    }

    async fn delete_all(&self) -> PersistenceResult<()> {
        sqlx::query("DELETE FROM accounts")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete accounts", e))?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    holder_name: String,
    balance_amount: i64,
    balance_currency: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: Some(AccountId(row.id)),
            holder_name: row.holder_name,
            balance: Money::new(row.balance_amount, Currency(row.balance_currency)),
        }
    }
}
