//! 账户表迁移

use bank_adapter_postgres::Migration;

const CREATE_ACCOUNTS: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id               BIGSERIAL PRIMARY KEY,
    holder_name      VARCHAR(255) NOT NULL,
    balance_amount   BIGINT NOT NULL DEFAULT 0,
    balance_currency VARCHAR(3) NOT NULL DEFAULT 'CNY'
)";

/// 账户服务的全部迁移
pub fn account_migrations() -> Vec<Migration> {
    vec![Migration::new(1, "create_accounts", CREATE_ACCOUNTS)]
}
