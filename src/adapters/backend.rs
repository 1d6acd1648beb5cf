use crate::error::StoreResult;
use crate::models::{
    ActorKey, FollowChange, FollowListPage, LikeToggle, ListQuery, Notification, ViewOutcome,
};
use async_trait::async_trait;

/// 浏览计数后端
///
/// 每个主题（作品、文章等）维护一个去重集合，`record_view`
/// 只在行为者首次出现时递增总数，重复调用返回当前计数且
/// `is_new_view` 为 false。
#[async_trait]
pub trait ViewStore: Send + Sync {
    async fn record_view(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<ViewOutcome>;

    async fn view_count(&self, subject_id: &str) -> StoreResult<u64>;
}

/// 点赞后端
///
/// `toggle_like` 是成员资格翻转：在集合中则移除并扣减计数，
/// 不在则加入并递增，计数永不为负。
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn toggle_like(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<LikeToggle>;

    async fn like_status(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<bool>;

    async fn like_count(&self, subject_id: &str) -> StoreResult<u64>;
}

/// 关注关系后端
///
/// 维护双向索引：每个被关注者一份粉丝列表（含计数），每个
/// 关注者一份正向列表。`follow`/`unfollow` 幂等，冗余调用
/// 返回 `changed: false` 且不产生任何写入。
#[async_trait]
pub trait FollowStore: Send + Sync {
    async fn follow(&self, follower_id: &str, target_id: &str) -> StoreResult<FollowChange>;

    async fn unfollow(&self, follower_id: &str, target_id: &str) -> StoreResult<FollowChange>;

    async fn follow_status(&self, follower_id: &str, target_id: &str) -> StoreResult<bool>;

    async fn follower_count(&self, target_id: &str) -> StoreResult<u64>;

    /// 列出 `target_id` 的粉丝，支持搜索过滤与游标分页。
    /// 过滤先于分页执行，`has_more` 以过滤后的总数为准。
    async fn list_followers(
        &self,
        target_id: &str,
        query: &ListQuery,
    ) -> StoreResult<FollowListPage>;

    /// 列出 `user_id` 正在关注的人，语义与 `list_followers` 一致。
    async fn list_following(&self, user_id: &str, query: &ListQuery)
        -> StoreResult<FollowListPage>;
}

/// 通知后端
///
/// 每个接收者一份按时间倒序的通知列表。`mark_read` 返回
/// 是否找到并翻转了目标通知，`mark_all_read` 返回翻转条数。
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: &Notification) -> StoreResult<()>;

    async fn list_notifications(
        &self,
        receiver_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<Notification>>;

    async fn unread_count(&self, receiver_id: &str) -> StoreResult<u64>;

    async fn mark_read(&self, receiver_id: &str, notification_id: &str) -> StoreResult<bool>;

    async fn mark_all_read(&self, receiver_id: &str) -> StoreResult<u64>;
}
