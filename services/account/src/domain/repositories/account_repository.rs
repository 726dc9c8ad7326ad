//! 账户 Repository trait

use std::cmp::Ordering;

use bank_common::{Pagination, Sort, SortDirection};
use bank_errors::{PersistenceError, PersistenceResult};
use bank_ports::PageableRepository;

use crate::domain::entities::{Account, AccountId};

/// 账户存储
///
/// 所有实现 `PageableRepository<Account, AccountId>` 的类型自动实现。
pub trait AccountRepository: PageableRepository<Account, AccountId> {}

impl<T> AccountRepository for T where T: PageableRepository<Account, AccountId> + ?Sized {}

/// 账户可排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSortField {
    Id,
    HolderName,
    Balance,
}

impl AccountSortField {
    /// 解析排序属性名，兼容 camelCase 写法
    pub fn from_property(property: &str) -> PersistenceResult<Self> {
        match property {
            "id" => Ok(Self::Id),
            "holder_name" | "holderName" => Ok(Self::HolderName),
            "balance" => Ok(Self::Balance),
            other => Err(PersistenceError::invalid_query(format!(
                "Unknown sort property for Account: {}",
                other
            ))),
        }
    }

    /// 对应的数据库排序表达式
    ///
    /// 文本列按字节序（`COLLATE "C"`）排序，与 `String` 的比较结果一致。
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Id => &["id"],
            Self::HolderName => &[r#"holder_name COLLATE "C""#],
            Self::Balance => &[r#"balance_currency COLLATE "C""#, "balance_amount"],
        }
    }

    pub fn compare(&self, a: &Account, b: &Account) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::HolderName => a.holder_name.cmp(&b.holder_name),
            Self::Balance => a.balance.cmp(&b.balance),
        }
    }
}

/// 已校验的排序规则
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSort {
    pub orders: Vec<(AccountSortField, SortDirection)>,
}

impl AccountSort {
    /// 校验排序属性，未知属性返回 `InvalidQuery`
    pub fn parse(sort: &Sort) -> PersistenceResult<Self> {
        let orders = sort
            .iter()
            .map(|o| AccountSortField::from_property(&o.property).map(|f| (f, o.direction)))
            .collect::<PersistenceResult<Vec<_>>>()?;
        Ok(Self { orders })
    }

    /// 是否已包含按 ID 排序
    pub fn has_id(&self) -> bool {
        self.orders.iter().any(|(f, _)| *f == AccountSortField::Id)
    }

    /// 依次比较各排序条件
    pub fn compare(&self, a: &Account, b: &Account) -> Ordering {
        for (field, direction) in &self.orders {
            let ordering = field.compare(a, b);
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// 生成 ORDER BY 子句，末尾追加 `id ASC` 保证分页稳定
    pub fn to_order_by(&self) -> String {
        let mut parts: Vec<String> = self
            .orders
            .iter()
            .flat_map(|(field, direction)| {
                field
                    .columns()
                    .iter()
                    .map(move |column| format!("{} {}", column, direction.as_sql()))
            })
            .collect();
        if !self.has_id() {
            parts.push("id ASC".to_string());
        }
        format!("ORDER BY {}", parts.join(", "))
    }
}

/// 页大小为 0 时拒绝查询
pub fn validate_pagination(pagination: &Pagination) -> PersistenceResult<()> {
    if pagination.page_size == 0 {
        return Err(PersistenceError::invalid_query("Page size must be greater than zero"));
    }
    Ok(())
}
