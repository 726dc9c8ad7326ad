//! 账户实体

use bank_domain_core::{Entity, Money};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 账户 ID（64 位整数，由存储分配）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 账户
///
/// 存储层不对持有人和余额施加业务规则。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<AccountId>,
    pub holder_name: String,
    pub balance: Money,
}

impl Account {
    /// 创建尚未持久化的账户
    pub fn new(holder_name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: None,
            holder_name: holder_name.into(),
            balance,
        }
    }

    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> Option<&AccountId> {
        self.id.as_ref()
    }
}
