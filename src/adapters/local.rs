use crate::adapters::backend::{FollowStore, LikeStore, NotificationStore, ViewStore};
use crate::error::StoreResult;
use crate::models::follow::{FollowRecord, FollowingRecord};
use crate::models::like::LikeRecord;
use crate::models::view::ViewRecord;
use crate::models::{
    ActorKey, ArtistProfile, FollowChange, FollowListItem, FollowListPage, LikeToggle, ListQuery,
    Notification, ViewOutcome,
};
use crate::storage::directory::ProfileDirectory;
use crate::storage::{get_json, keys, put_json, KeyValueStore};
use crate::utils::cursor;
use async_trait::async_trait;
use std::sync::Arc;

/// 未显式指定时的单页条数
const DEFAULT_LIMIT: usize = 20;

/// 本地后端：把所有社交计数落在键值缓存上
///
/// 既是远程存储不可用时的回退路径，也是离线 / 测试环境下的
/// 唯一后端。所有写入都是读-改-写整条记录，单条记录内的
/// 计数与去重集合因此保持一致。
pub struct LocalBackend {
    store: Arc<dyn KeyValueStore>,
    directory: Arc<dyn ProfileDirectory>,
}

impl LocalBackend {
    pub fn new(store: Arc<dyn KeyValueStore>, directory: Arc<dyn ProfileDirectory>) -> Self {
        Self { store, directory }
    }

    /// 对一份成员 id 列表做搜索过滤 + 游标分页，产出展示页。
    ///
    /// 过滤必须在分页之前完成，否则 has_more 的分母就不对了。
    async fn page_members(
        &self,
        member_ids: &[String],
        query: &ListQuery,
    ) -> StoreResult<FollowListPage> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT as u32) as usize;
        let needle = query
            .query
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut filtered: Vec<(String, Option<ArtistProfile>)> = Vec::new();
        for id in member_ids {
            let profile = self.directory.get_profile(id).await?;
            let matched = match &needle {
                Some(needle) => {
                    let blob = profile
                        .as_ref()
                        .map(|p| p.search_blob())
                        .unwrap_or_else(|| id.to_lowercase());
                    blob.contains(needle.as_str())
                }
                None => true,
            };
            if matched {
                filtered.push((id.clone(), profile));
            }
        }

        // 查看者自己的正向列表只读一次，逐条算 is_followed_by_me
        let viewer_following = match &query.current_user_id {
            Some(me) => {
                get_json::<FollowingRecord>(self.store.as_ref(), &keys::artist_following(me))
                    .await?
                    .unwrap_or_default()
            }
            None => FollowingRecord::default(),
        };

        let offset = cursor::decode(query.cursor.as_deref());
        let total = filtered.len();
        let mut items = Vec::new();
        for (id, profile) in filtered.into_iter().skip(offset).take(limit) {
            let is_followed_by_me = query.current_user_id.is_some() && viewer_following.contains(&id);
            items.push(build_list_item(id, profile, is_followed_by_me));
        }

        // 外来游标可能编码一个天文数字的偏移量，饱和加法兜住溢出
        let has_more = offset.saturating_add(limit) < total;
        let next_cursor = has_more.then(|| cursor::encode(offset + limit));

        Ok(FollowListPage {
            items,
            has_more,
            cursor: next_cursor,
        })
    }
}

/// 无档案的成员退化成只有 id 的占位条目
fn build_list_item(
    id: String,
    profile: Option<ArtistProfile>,
    is_followed_by_me: bool,
) -> FollowListItem {
    match profile {
        Some(profile) => FollowListItem {
            username: profile.username,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            school: profile.school,
            skills: profile.skills,
            is_followed_by_me,
            id,
        },
        None => FollowListItem {
            username: None,
            display_name: id.clone(),
            avatar_url: None,
            school: None,
            skills: Vec::new(),
            is_followed_by_me,
            id,
        },
    }
}

#[async_trait]
impl ViewStore for LocalBackend {
    async fn record_view(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<ViewOutcome> {
        let key = keys::artwork_views(subject_id);
        let mut record = get_json::<ViewRecord>(self.store.as_ref(), &key)
            .await?
            .unwrap_or_default();

        let is_new_view = record.admit(actor);
        if is_new_view {
            put_json(self.store.as_ref(), &key, &record).await?;
        }

        Ok(ViewOutcome {
            view_count: record.total_views,
            is_new_view,
        })
    }

    async fn view_count(&self, subject_id: &str) -> StoreResult<u64> {
        let record = get_json::<ViewRecord>(self.store.as_ref(), &keys::artwork_views(subject_id))
            .await?
            .unwrap_or_default();
        Ok(record.total_views)
    }
}

#[async_trait]
impl LikeStore for LocalBackend {
    async fn toggle_like(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<LikeToggle> {
        let key = keys::artwork_likes(subject_id);
        let mut record = get_json::<LikeRecord>(self.store.as_ref(), &key)
            .await?
            .unwrap_or_default();

        let active = record.toggle(actor);
        put_json(self.store.as_ref(), &key, &record).await?;

        Ok(LikeToggle {
            active,
            like_count: record.total_likes,
        })
    }

    async fn like_status(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<bool> {
        let record = get_json::<LikeRecord>(self.store.as_ref(), &keys::artwork_likes(subject_id))
            .await?
            .unwrap_or_default();
        Ok(record.contains(actor))
    }

    async fn like_count(&self, subject_id: &str) -> StoreResult<u64> {
        let record = get_json::<LikeRecord>(self.store.as_ref(), &keys::artwork_likes(subject_id))
            .await?
            .unwrap_or_default();
        Ok(record.total_likes)
    }
}

#[async_trait]
impl FollowStore for LocalBackend {
    async fn follow(&self, follower_id: &str, target_id: &str) -> StoreResult<FollowChange> {
        let followers_key = keys::artist_follows(target_id);
        let mut followers = get_json::<FollowRecord>(self.store.as_ref(), &followers_key)
            .await?
            .unwrap_or_default();

        let changed = followers.add(follower_id);
        if changed {
            put_json(self.store.as_ref(), &followers_key, &followers).await?;

            // 正向索引与反向索引一起维护，列表读取才不用全表扫描
            let following_key = keys::artist_following(follower_id);
            let mut following = get_json::<FollowingRecord>(self.store.as_ref(), &following_key)
                .await?
                .unwrap_or_default();
            following.add(target_id);
            put_json(self.store.as_ref(), &following_key, &following).await?;
        }

        Ok(FollowChange {
            active: true,
            changed,
            follower_count: followers.followers_count,
        })
    }

    async fn unfollow(&self, follower_id: &str, target_id: &str) -> StoreResult<FollowChange> {
        let followers_key = keys::artist_follows(target_id);
        let mut followers = get_json::<FollowRecord>(self.store.as_ref(), &followers_key)
            .await?
            .unwrap_or_default();

        let changed = followers.remove(follower_id);
        if changed {
            put_json(self.store.as_ref(), &followers_key, &followers).await?;

            let following_key = keys::artist_following(follower_id);
            let mut following = get_json::<FollowingRecord>(self.store.as_ref(), &following_key)
                .await?
                .unwrap_or_default();
            following.remove(target_id);
            put_json(self.store.as_ref(), &following_key, &following).await?;
        }

        Ok(FollowChange {
            active: false,
            changed,
            follower_count: followers.followers_count,
        })
    }

    async fn follow_status(&self, follower_id: &str, target_id: &str) -> StoreResult<bool> {
        let following =
            get_json::<FollowingRecord>(self.store.as_ref(), &keys::artist_following(follower_id))
                .await?
                .unwrap_or_default();
        Ok(following.contains(target_id))
    }

    async fn follower_count(&self, target_id: &str) -> StoreResult<u64> {
        let followers =
            get_json::<FollowRecord>(self.store.as_ref(), &keys::artist_follows(target_id))
                .await?
                .unwrap_or_default();
        Ok(followers.followers_count)
    }

    async fn list_followers(
        &self,
        target_id: &str,
        query: &ListQuery,
    ) -> StoreResult<FollowListPage> {
        let followers =
            get_json::<FollowRecord>(self.store.as_ref(), &keys::artist_follows(target_id))
                .await?
                .unwrap_or_default();
        self.page_members(&followers.followers, query).await
    }

    async fn list_following(
        &self,
        user_id: &str,
        query: &ListQuery,
    ) -> StoreResult<FollowListPage> {
        let following =
            get_json::<FollowingRecord>(self.store.as_ref(), &keys::artist_following(user_id))
                .await?
                .unwrap_or_default();
        self.page_members(&following.following, query).await
    }
}

#[async_trait]
impl NotificationStore for LocalBackend {
    async fn insert_notification(&self, notification: &Notification) -> StoreResult<()> {
        let key = keys::notifications(&notification.receiver_id);
        let mut list = get_json::<Vec<Notification>>(self.store.as_ref(), &key)
            .await?
            .unwrap_or_default();

        // 新通知插到队头，列表天然按时间倒序
        list.insert(0, notification.clone());
        put_json(self.store.as_ref(), &key, &list).await
    }

    async fn list_notifications(
        &self,
        receiver_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<Notification>> {
        let mut list =
            get_json::<Vec<Notification>>(self.store.as_ref(), &keys::notifications(receiver_id))
                .await?
                .unwrap_or_default();
        list.truncate(limit);
        Ok(list)
    }

    async fn unread_count(&self, receiver_id: &str) -> StoreResult<u64> {
        let list =
            get_json::<Vec<Notification>>(self.store.as_ref(), &keys::notifications(receiver_id))
                .await?
                .unwrap_or_default();
        Ok(list.iter().filter(|n| !n.is_read).count() as u64)
    }

    async fn mark_read(&self, receiver_id: &str, notification_id: &str) -> StoreResult<bool> {
        let key = keys::notifications(receiver_id);
        let mut list = get_json::<Vec<Notification>>(self.store.as_ref(), &key)
            .await?
            .unwrap_or_default();

        let mut found = false;
        for notification in list.iter_mut() {
            if notification.id == notification_id {
                notification.is_read = true;
                found = true;
                break;
            }
        }

        if found {
            put_json(self.store.as_ref(), &key, &list).await?;
        }
        Ok(found)
    }

    async fn mark_all_read(&self, receiver_id: &str) -> StoreResult<u64> {
        let key = keys::notifications(receiver_id);
        let mut list = get_json::<Vec<Notification>>(self.store.as_ref(), &key)
            .await?
            .unwrap_or_default();

        let mut updated = 0u64;
        for notification in list.iter_mut() {
            if !notification.is_read {
                notification.is_read = true;
                updated += 1;
            }
        }

        if updated > 0 {
            put_json(self.store.as_ref(), &key, &list).await?;
        }
        Ok(updated)
    }
}
