use crate::error::StoreResult;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// 进程内的键值存储。
///
/// 既是默认的本地缓存后端，也是测试注入的内存假件。单键读写由
/// DashMap 串行化，整条记录的读-改-写回路没有事务性。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: Value) -> StoreResult<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.data.remove(key);
        Ok(())
    }
}
