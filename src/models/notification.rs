use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Follow,
    Like,
    Comment,
    CollaborationApplication,
}

/// 持久化的通知记录。创建后内容不再修改，只允许翻转 `is_read`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub notification_type: NotificationType,
    pub sender_id: String,
    pub receiver_id: String,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub meta: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub notification_type: NotificationType,
    pub sender_id: String,
    pub receiver_id: String,

    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(max = 500))]
    pub content: String,

    pub meta: serde_json::Value,
}
