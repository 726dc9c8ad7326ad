//! Repository trait 定义

use async_trait::async_trait;
use bank_common::{PagedResult, Pagination, Sort};
use bank_domain_core::Entity;
use bank_errors::PersistenceResult;

/// 基础 Repository trait
///
/// 每个方法是一次针对存储的独立请求，不跨调用维护事务。
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Entity<Id = ID> + Send + Sync + 'static,
    ID: Send + Sync + 'static,
{
    /// 保存实体：无标识时插入并分配标识，有标识时按标识更新（不存在则插入）
    async fn save(&self, entity: T) -> PersistenceResult<T>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ID) -> PersistenceResult<Option<T>>;

    /// 根据一组 ID 查找，不存在的 ID 被忽略
    async fn find_all_by_id(&self, ids: &[ID]) -> PersistenceResult<Vec<T>>;

    /// 检查是否存在
    async fn exists_by_id(&self, id: &ID) -> PersistenceResult<bool>;

    /// 根据 ID 删除，记录不存在时不报错
    async fn delete_by_id(&self, id: &ID) -> PersistenceResult<()>;

    /// 依次保存，返回持久化后的实体
    async fn save_all(&self, entities: Vec<T>) -> PersistenceResult<Vec<T>> {
        let mut saved = Vec::with_capacity(entities.len());
        for entity in entities {
            saved.push(self.save(entity).await?);
        }
        Ok(saved)
    }

    /// 删除实体，未持久化的实体直接忽略
    async fn delete(&self, entity: &T) -> PersistenceResult<()> {
        match entity.id() {
            Some(id) => self.delete_by_id(id).await,
            None => Ok(()),
        }
    }

    async fn delete_all_by_id(&self, ids: &[ID]) -> PersistenceResult<()> {
        for id in ids {
            self.delete_by_id(id).await?;
        }
        Ok(())
    }
}

/// 支持排序和分页查询的 Repository
#[async_trait]
pub trait PageableRepository<T, ID>: Repository<T, ID>
where
    T: Entity<Id = ID> + Send + Sync + 'static,
    ID: Send + Sync + 'static,
{
    /// 按排序规则查询全部
    async fn find_all_sorted(&self, sort: &Sort) -> PersistenceResult<Vec<T>>;

    /// 分页查询，`total` 为记录总数
    async fn find_page(
        &self,
        pagination: &Pagination,
        sort: &Sort,
    ) -> PersistenceResult<PagedResult<T>>;

    /// 统计总数
    async fn count(&self) -> PersistenceResult<u64>;

    /// 删除全部记录
    async fn delete_all(&self) -> PersistenceResult<()>;

    /// 查询全部，顺序由存储决定；可重复调用
    async fn find_all(&self) -> PersistenceResult<Vec<T>> {
        self.find_all_sorted(&Sort::unsorted()).await
    }
}
