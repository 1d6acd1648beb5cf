use crate::adapters::LikeBackends;
use crate::error::Result;
use crate::models::{ActorKey, LikeToggle};
use crate::services::NotificationService;
use futures::FutureExt;
use tracing::{debug, info};

/// 点赞服务。
///
/// 点赞是可逆的成员翻转，同一行为人反复调用在点赞/取消之间来回。
/// 只有"从无到有"的那一次通知作品作者；访客点赞和给自己的作品
/// 点赞都不产生通知。
#[derive(Clone)]
pub struct LikeService {
    backends: LikeBackends,
    notification_service: NotificationService,
}

impl LikeService {
    pub fn new(backends: LikeBackends, notification_service: NotificationService) -> Self {
        Self {
            backends,
            notification_service,
        }
    }

    /// 翻转点赞状态。
    ///
    /// `subject_owner` 是作品作者，调用方有就传；缺失只影响通知，
    /// 不影响计数。
    pub async fn toggle_like(
        &self,
        subject_id: &str,
        actor: &ActorKey,
        subject_owner: Option<&str>,
    ) -> Result<LikeToggle> {
        debug!("Toggling like on {} by {}", subject_id, actor);

        let toggle = self
            .backends
            .run("toggle_like", |backend| {
                let subject_id = subject_id.to_string();
                let actor = actor.clone();
                async move { backend.toggle_like(&subject_id, &actor).await }.boxed()
            })
            .await?;

        if toggle.active {
            if let (Some(owner), Some(sender)) = (subject_owner, actor.user_id()) {
                if owner != sender {
                    if let Err(e) = self
                        .notification_service
                        .create_like_notification(sender, owner, subject_id)
                        .await
                    {
                        // 记录错误但不中断流程
                        tracing::warn!("Failed to send like notification: {}", e);
                    }
                }
            }
            info!("{} liked {}", actor, subject_id);
        } else {
            info!("{} unliked {}", actor, subject_id);
        }

        Ok(toggle)
    }

    pub async fn check_like_status(&self, subject_id: &str, actor: &ActorKey) -> Result<bool> {
        self.backends
            .run("like_status", |backend| {
                let subject_id = subject_id.to_string();
                let actor = actor.clone();
                async move { backend.like_status(&subject_id, &actor).await }.boxed()
            })
            .await
    }

    pub async fn get_like_count(&self, subject_id: &str) -> Result<u64> {
        self.backends
            .run("like_count", |backend| {
                let subject_id = subject_id.to_string();
                async move { backend.like_count(&subject_id).await }.boxed()
            })
            .await
    }
}
