use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

pub mod directory;
pub mod keys;
pub mod memory;

pub use directory::{KvProfileDirectory, ProfileDirectory};
pub use memory::MemoryStore;

#[cfg(test)]
use mockall::automock;

/// 本地缓存的键值抽象。
///
/// 实现注入到组合根，测试可以换成内存假件。读写签名是异步的，
/// 这是为了与远程适配器保持接口一致，进程内实现应当在当前轮次
/// 直接完成。
///
/// 已知限制：多个写者对同一键做"读-改-写"时没有互锁，后写覆盖
/// 先写。这沿袭了产品层面已接受的共享缓存竞态。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;
    async fn put(&self, key: &str, value: Value) -> StoreResult<()>;
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

/// 读取并反序列化一个JSON记录。
/// 损坏的记录按不存在处理：打日志后返回 None，让上层重建。
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => match serde_json::from_value(raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Discarding corrupt record at key {}: {}", key, e);
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

/// 序列化并写入一个JSON记录
pub async fn put_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    record: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_value(record)
        .map_err(|e| StoreError::fatal(format!("Failed to serialize record for {}: {}", key, e)))?;
    store.put(key, raw).await
}
