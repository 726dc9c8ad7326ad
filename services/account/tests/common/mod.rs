//! 账户存储契约测试
//!
//! 每个检查假定存储为空，调用方负责在检查之间清空存储

#![allow(dead_code)]

use account_service::domain::entities::{Account, AccountId};
use account_service::domain::repositories::AccountRepository;
use bank_common::{Pagination, Sort, SortOrder};
use bank_domain_core::Money;
use bank_errors::PersistenceError;

pub fn alice() -> Account {
    Account::new("Alice", Money::cny(120_00))
}

pub fn bob() -> Account {
    Account::new("Bob", Money::usd(5_00))
}

pub fn carol() -> Account {
    Account::new("Carol", Money::cny(-3_50))
}

/// 小写开头，按字节序排在所有大写名字之后
pub fn dave() -> Account {
    Account::new("dave", Money::cny(0))
}

/// 保存后按返回的 ID 查询得到相同记录
pub async fn save_then_find_round_trip(repo: &dyn AccountRepository) {
    let saved = repo.save(alice()).await.expect("save failed");
    let id = saved.id.expect("id not assigned");

    let found = repo.find_by_id(&id).await.expect("find failed");
    assert_eq!(found, Some(alice().with_id(id)));
    assert_eq!(saved, alice().with_id(id));
}

/// 不存在的 ID
pub async fn absent_id_is_empty(repo: &dyn AccountRepository) {
    let id = AccountId(987_654_321);
    assert_eq!(repo.find_by_id(&id).await.unwrap(), None);
    assert!(!repo.exists_by_id(&id).await.unwrap());
}

/// 连续删除两次不报错
pub async fn delete_is_idempotent(repo: &dyn AccountRepository) {
    let id = repo.save(bob()).await.unwrap().id.unwrap();

    repo.delete_by_id(&id).await.expect("first delete failed");
    repo.delete_by_id(&id).await.expect("second delete failed");
    assert!(!repo.exists_by_id(&id).await.unwrap());
}

/// 保存 n 条、删除 m 条后 count == n - m
pub async fn count_tracks_saves_and_deletes(repo: &dyn AccountRepository) {
    let mut ids = Vec::new();
    for i in 0..5 {
        let account = Account::new(format!("Holder {}", i), Money::cny(i * 100));
        ids.push(repo.save(account).await.unwrap().id.unwrap());
    }
    assert_eq!(repo.count().await.unwrap(), 5);

    for id in &ids[..2] {
        repo.delete_by_id(id).await.unwrap();
    }
    assert_eq!(repo.count().await.unwrap(), 3);
}

/// 完整生命周期：保存 → 查询 → 删除 → 查询为空
pub async fn lifecycle(repo: &dyn AccountRepository) -> AccountId {
    let saved = repo.save(alice()).await.unwrap();
    let id = saved.id.unwrap();

    assert_eq!(repo.find_by_id(&id).await.unwrap(), Some(saved));
    repo.delete_by_id(&id).await.unwrap();
    assert_eq!(repo.find_by_id(&id).await.unwrap(), None);
    assert!(!repo.exists_by_id(&id).await.unwrap());
    id
}

/// 带 ID 保存时更新已有记录，不新增
pub async fn save_updates_existing(repo: &dyn AccountRepository) {
    let saved = repo.save(alice()).await.unwrap();
    let id = saved.id.unwrap();

    let mut changed = saved.clone();
    changed.holder_name = "Alice Zhang".to_string();
    changed.balance = Money::cny(0);
    let updated = repo.save(changed.clone()).await.unwrap();

    assert_eq!(updated, changed);
    assert_eq!(repo.find_by_id(&id).await.unwrap(), Some(changed));
    assert_eq!(repo.count().await.unwrap(), 1);
}

/// 带未使用的 ID 保存时按该 ID 插入，后续分配的 ID 更大
pub async fn save_with_unused_id_inserts(repo: &dyn AccountRepository) {
    let existing = repo.save(bob()).await.unwrap().id.unwrap();
    let explicit = AccountId(existing.0 + 1_000);

    let saved = repo.save(carol().with_id(explicit)).await.unwrap();
    assert_eq!(saved.id, Some(explicit));
    assert!(repo.exists_by_id(&explicit).await.unwrap());

    let next = repo.save(alice()).await.unwrap().id.unwrap();
    assert!(next > explicit, "{} should be greater than {}", next, explicit);
}

/// find_all 可重复调用且结果一致
pub async fn find_all_is_restartable(repo: &dyn AccountRepository) {
    repo.save_all(vec![alice(), bob(), carol()]).await.unwrap();

    let first = repo.find_all().await.unwrap();
    let second = repo.find_all().await.unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

/// 排序与分页，文本按字节序比较
pub async fn sorting_and_paging(repo: &dyn AccountRepository) {
    let saved = repo
        .save_all(vec![carol(), dave(), alice(), bob()])
        .await
        .unwrap();
    assert!(saved.iter().all(|a| a.id.is_some()));

    let by_name = repo.find_all_sorted(&Sort::by("holder_name")).await.unwrap();
    let names: Vec<&str> = by_name.iter().map(|a| a.holder_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol", "dave"]);

    let by_name_desc = repo.find_all_sorted(&Sort::by_desc("holderName")).await.unwrap();
    let names: Vec<&str> = by_name_desc.iter().map(|a| a.holder_name.as_str()).collect();
    assert_eq!(names, vec!["dave", "Carol", "Bob", "Alice"]);

    // 余额先按币种再按金额
    let by_balance = repo.find_all_sorted(&Sort::by("balance")).await.unwrap();
    let names: Vec<&str> = by_balance.iter().map(|a| a.holder_name.as_str()).collect();
    assert_eq!(names, vec!["Carol", "dave", "Alice", "Bob"]);

    let sort = Sort::by("holder_name");
    let page1 = repo.find_page(&Pagination::new(1, 3), &sort).await.unwrap();
    assert_eq!(page1.total, 4);
    assert_eq!(page1.total_pages(), 2);
    assert!(page1.has_next());
    let names: Vec<&str> = page1.items.iter().map(|a| a.holder_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    let page2 = repo.find_page(&Pagination::new(2, 3), &sort).await.unwrap();
    let names: Vec<&str> = page2.items.iter().map(|a| a.holder_name.as_str()).collect();
    assert_eq!(names, vec!["dave"]);
    assert!(!page2.has_next());

    let beyond = repo.find_page(&Pagination::new(5, 3), &sort).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 4);

    // 多条件排序
    let multi = Sort::by_desc("balance").and(SortOrder::asc("id"));
    let ordered = repo.find_all_sorted(&multi).await.unwrap();
    let names: Vec<&str> = ordered.iter().map(|a| a.holder_name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Alice", "dave", "Carol"]);
}

/// 非法查询参数在访问存储前被拒绝
pub async fn invalid_queries_rejected(repo: &dyn AccountRepository) {
    let err = repo.find_all_sorted(&Sort::by("secret")).await.unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidQuery(_)));

    let err = repo
        .find_page(&Pagination::new(1, 0), &Sort::unsorted())
        .await
        .unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidQuery(_)));

    let err = repo
        .find_page(&Pagination::default(), &Sort::by("balance; DROP TABLE accounts"))
        .await
        .unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidQuery(_)));
}

/// 批量操作
pub async fn bulk_operations(repo: &dyn AccountRepository) {
    let saved = repo.save_all(vec![alice(), bob(), carol()]).await.unwrap();
    let ids: Vec<AccountId> = saved.iter().filter_map(|a| a.id).collect();
    assert_eq!(ids.len(), 3);

    let missing = AccountId(ids[2].0 + 10_000);
    let found = repo
        .find_all_by_id(&[ids[1], missing, ids[0], ids[1]])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&saved[0]));
    assert!(found.contains(&saved[1]));

    repo.delete(&saved[0]).await.unwrap();
    // 未持久化的实体删除为空操作
    repo.delete(&alice()).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);

    repo.delete_all_by_id(&[ids[1], missing]).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    repo.delete_all().await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.find_all().await.unwrap().is_empty());
}
