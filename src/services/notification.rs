use crate::adapters::NotificationBackends;
use crate::error::{AppError, Result};
use crate::models::{AppEvent, CreateNotificationRequest, Notification, NotificationType};
use crate::services::EventBus;
use chrono::Utc;
use futures::FutureExt;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// 未显式指定时一次拉取的通知条数
const DEFAULT_LIST_LIMIT: usize = 50;
const MAX_LIST_LIMIT: usize = 200;

/// 通知服务。
///
/// 通知是持久事实，落库成功后才广播 `notif:unreadChanged`，掉线
/// 重连的客户端收不到事件也能从列表里拉到全量。
#[derive(Clone)]
pub struct NotificationService {
    backends: NotificationBackends,
    events: EventBus,
}

impl NotificationService {
    pub fn new(backends: NotificationBackends, events: EventBus) -> Self {
        Self { backends, events }
    }

    /// 创建通知：校验、落库、广播未读数变化
    pub async fn create_notification(
        &self,
        request: CreateNotificationRequest,
    ) -> Result<Notification> {
        request.validate()?;

        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            notification_type: request.notification_type,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            title: request.title,
            content: request.content,
            is_read: false,
            created_at: Utc::now(),
            meta: request.meta,
        };

        self.backends
            .run("insert_notification", |backend| {
                let notification = notification.clone();
                async move { backend.insert_notification(&notification).await }.boxed()
            })
            .await?;

        self.events.publish(&AppEvent::UnreadChanged {
            user_id: notification.receiver_id.clone(),
        });

        info!(
            "Notification {} delivered to {}",
            notification.id, notification.receiver_id
        );
        Ok(notification)
    }

    pub async fn create_follow_notification(
        &self,
        sender_id: &str,
        receiver_id: &str,
    ) -> Result<Notification> {
        let request = CreateNotificationRequest {
            notification_type: NotificationType::Follow,
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            title: "New follower".to_string(),
            content: "Someone just followed you".to_string(),
            meta: json!({ "follower_id": sender_id }),
        };
        self.create_notification(request).await
    }

    pub async fn create_like_notification(
        &self,
        sender_id: &str,
        receiver_id: &str,
        subject_id: &str,
    ) -> Result<Notification> {
        let request = CreateNotificationRequest {
            notification_type: NotificationType::Like,
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            title: "New like".to_string(),
            content: "Someone liked your artwork".to_string(),
            meta: json!({
                "sender_id": sender_id,
                "subject_id": subject_id,
            }),
        };
        self.create_notification(request).await
    }

    pub async fn create_comment_notification(
        &self,
        sender_id: &str,
        receiver_id: &str,
        subject_id: &str,
    ) -> Result<Notification> {
        let request = CreateNotificationRequest {
            notification_type: NotificationType::Comment,
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            title: "New comment".to_string(),
            content: "Someone commented on your artwork".to_string(),
            meta: json!({
                "sender_id": sender_id,
                "subject_id": subject_id,
            }),
        };
        self.create_notification(request).await
    }

    pub async fn create_collaboration_notification(
        &self,
        sender_id: &str,
        receiver_id: &str,
        collaboration_id: &str,
    ) -> Result<Notification> {
        let request = CreateNotificationRequest {
            notification_type: NotificationType::CollaborationApplication,
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            title: "New collaboration application".to_string(),
            content: "Someone applied to join your collaboration".to_string(),
            meta: json!({
                "sender_id": sender_id,
                "collaboration_id": collaboration_id,
            }),
        };
        self.create_notification(request).await
    }

    /// 按时间倒序拉取通知
    pub async fn list_notifications(
        &self,
        receiver_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
        self.backends
            .run("list_notifications", |backend| {
                let receiver_id = receiver_id.to_string();
                async move { backend.list_notifications(&receiver_id, limit).await }.boxed()
            })
            .await
    }

    pub async fn get_unread_count(&self, receiver_id: &str) -> Result<u64> {
        self.backends
            .run("unread_count", |backend| {
                let receiver_id = receiver_id.to_string();
                async move { backend.unread_count(&receiver_id).await }.boxed()
            })
            .await
    }

    /// 标记单条已读；目标不存在返回 NotFound
    pub async fn mark_as_read(&self, receiver_id: &str, notification_id: &str) -> Result<()> {
        let found = self
            .backends
            .run("mark_read", |backend| {
                let receiver_id = receiver_id.to_string();
                let notification_id = notification_id.to_string();
                async move { backend.mark_read(&receiver_id, &notification_id).await }.boxed()
            })
            .await?;

        if !found {
            return Err(AppError::not_found("Notification"));
        }

        self.events.publish(&AppEvent::UnreadChanged {
            user_id: receiver_id.to_string(),
        });
        debug!("Notification {} marked as read", notification_id);
        Ok(())
    }

    /// 全部标记已读，返回翻转的条数
    pub async fn mark_all_as_read(&self, receiver_id: &str) -> Result<u64> {
        let updated = self
            .backends
            .run("mark_all_read", |backend| {
                let receiver_id = receiver_id.to_string();
                async move { backend.mark_all_read(&receiver_id).await }.boxed()
            })
            .await?;

        if updated > 0 {
            self.events.publish(&AppEvent::UnreadChanged {
                user_id: receiver_id.to_string(),
            });
        }
        debug!("Marked {} notification(s) as read for {}", updated, receiver_id);
        Ok(updated)
    }
}
