use crate::adapters::FollowBackends;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AppEvent, FollowChange, FollowListPage, FollowOperation, ListQuery};
use crate::services::{EventBus, NotificationService};
use futures::FutureExt;
use tracing::{debug, info};
use validator::Validate;

/// 关注关系服务。
///
/// 关注/取关幂等：冗余调用返回 `changed: false`，且既不发事件也
/// 不发通知。副作用只挂在真实的状态变化上，连点关注按钮不会刷出
/// 一排重复通知。
#[derive(Clone)]
pub struct FollowService {
    backends: FollowBackends,
    notification_service: NotificationService,
    events: EventBus,
    default_page_size: u32,
    max_page_size: u32,
}

impl FollowService {
    pub fn new(
        backends: FollowBackends,
        notification_service: NotificationService,
        events: EventBus,
        config: &Config,
    ) -> Self {
        Self {
            backends,
            notification_service,
            events,
            default_page_size: config.default_page_size as u32,
            max_page_size: config.max_page_size as u32,
        }
    }

    pub async fn follow_artist(&self, follower_id: &str, target_id: &str) -> Result<FollowChange> {
        debug!("User {} following artist {}", follower_id, target_id);
        self.ensure_valid_pair(follower_id, target_id)?;

        let change = self
            .backends
            .run("follow", |backend| {
                let follower_id = follower_id.to_string();
                let target_id = target_id.to_string();
                async move { backend.follow(&follower_id, &target_id).await }.boxed()
            })
            .await?;

        if change.changed {
            self.events.publish(&AppEvent::FollowChanged {
                follower_id: follower_id.to_string(),
                artist_id: target_id.to_string(),
                is_following: true,
                operation: FollowOperation::Follow,
            });

            if let Err(e) = self
                .notification_service
                .create_follow_notification(follower_id, target_id)
                .await
            {
                // 记录错误但不中断流程
                tracing::warn!("Failed to send follow notification: {}", e);
            }

            info!("User {} followed artist {}", follower_id, target_id);
        }

        Ok(change)
    }

    pub async fn unfollow_artist(
        &self,
        follower_id: &str,
        target_id: &str,
    ) -> Result<FollowChange> {
        debug!("User {} unfollowing artist {}", follower_id, target_id);
        self.ensure_valid_pair(follower_id, target_id)?;

        let change = self
            .backends
            .run("unfollow", |backend| {
                let follower_id = follower_id.to_string();
                let target_id = target_id.to_string();
                async move { backend.unfollow(&follower_id, &target_id).await }.boxed()
            })
            .await?;

        if change.changed {
            self.events.publish(&AppEvent::FollowChanged {
                follower_id: follower_id.to_string(),
                artist_id: target_id.to_string(),
                is_following: false,
                operation: FollowOperation::Unfollow,
            });

            info!("User {} unfollowed artist {}", follower_id, target_id);
        }

        Ok(change)
    }

    pub async fn check_follow_status(&self, follower_id: &str, target_id: &str) -> Result<bool> {
        self.backends
            .run("follow_status", |backend| {
                let follower_id = follower_id.to_string();
                let target_id = target_id.to_string();
                async move { backend.follow_status(&follower_id, &target_id).await }.boxed()
            })
            .await
    }

    pub async fn get_follower_count(&self, target_id: &str) -> Result<u64> {
        self.backends
            .run("follower_count", |backend| {
                let target_id = target_id.to_string();
                async move { backend.follower_count(&target_id).await }.boxed()
            })
            .await
    }

    /// 某个艺术家的粉丝列表，搜索 + 游标分页
    pub async fn get_followers(
        &self,
        target_id: &str,
        query: &ListQuery,
    ) -> Result<FollowListPage> {
        debug!("Listing followers of {}", target_id);
        query.validate()?;
        let query = self.normalize(query);

        self.backends
            .run("list_followers", |backend| {
                let target_id = target_id.to_string();
                let query = query.clone();
                async move { backend.list_followers(&target_id, &query).await }.boxed()
            })
            .await
    }

    /// 某个用户关注的艺术家列表
    pub async fn get_following(&self, user_id: &str, query: &ListQuery) -> Result<FollowListPage> {
        debug!("Listing artists {} follows", user_id);
        query.validate()?;
        let query = self.normalize(query);

        self.backends
            .run("list_following", |backend| {
                let user_id = user_id.to_string();
                let query = query.clone();
                async move { backend.list_following(&user_id, &query).await }.boxed()
            })
            .await
    }

    fn ensure_valid_pair(&self, follower_id: &str, target_id: &str) -> Result<()> {
        if follower_id.is_empty() || target_id.is_empty() {
            return Err(AppError::validation("Follower and target ids are required"));
        }
        // 防止自己关注自己
        if follower_id == target_id {
            return Err(AppError::bad_request("Cannot follow yourself"));
        }
        Ok(())
    }

    fn normalize(&self, query: &ListQuery) -> ListQuery {
        let limit = query
            .limit
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size);
        ListQuery {
            limit: Some(limit),
            cursor: query.cursor.clone(),
            query: query.query.clone(),
            current_user_id: query.current_user_id.clone(),
        }
    }
}
