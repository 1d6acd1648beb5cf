use crate::error::StoreResult;
use crate::models::profile::ArtistProfile;
use crate::storage::{self, keys, KeyValueStore};
use async_trait::async_trait;
use std::sync::Arc;

/// 艺术家档案目录。
///
/// 关注列表的条目拼装和搜索文本都从这里取数；档案本身由外围产品
/// 写入，这里只是读取侧的一个窄接口。
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<ArtistProfile>>;
    async fn upsert_profile(&self, profile: &ArtistProfile) -> StoreResult<()>;
}

/// 基于键值缓存的档案目录实现
#[derive(Clone)]
pub struct KvProfileDirectory {
    store: Arc<dyn KeyValueStore>,
}

impl KvProfileDirectory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileDirectory for KvProfileDirectory {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<ArtistProfile>> {
        storage::get_json(self.store.as_ref(), &keys::artist_profile(user_id)).await
    }

    async fn upsert_profile(&self, profile: &ArtistProfile) -> StoreResult<()> {
        storage::put_json(
            self.store.as_ref(),
            &keys::artist_profile(&profile.user_id),
            profile,
        )
        .await
    }
}
