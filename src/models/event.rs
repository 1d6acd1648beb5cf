use serde::Serialize;

/// 事件种类，订阅时按它过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FollowChanged,
    UnreadChanged,
    DraftSaved,
    CollaborationCreated,
}

impl EventKind {
    /// 对外的事件名，沿用产品既有的命名约定
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::FollowChanged => "follow:changed",
            EventKind::UnreadChanged => "notif:unreadChanged",
            EventKind::DraftSaved => "draft:saved",
            EventKind::CollaborationCreated => "collaboration:created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowOperation {
    Follow,
    Unfollow,
}

/// 进程内广播的类型化事件。
///
/// 总线只保证把事件同步派发给当前已注册的监听者，不去重也不跨进程，
/// 监听者应当以"重新拉取并替换"的方式消费，而不是原地累加。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    FollowChanged {
        follower_id: String,
        artist_id: String,
        is_following: bool,
        operation: FollowOperation,
    },
    UnreadChanged {
        user_id: String,
    },
    DraftSaved {
        draft_id: String,
    },
    CollaborationCreated {
        collaboration_id: String,
    },
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::FollowChanged { .. } => EventKind::FollowChanged,
            AppEvent::UnreadChanged { .. } => EventKind::UnreadChanged,
            AppEvent::DraftSaved { .. } => EventKind::DraftSaved,
            AppEvent::CollaborationCreated { .. } => EventKind::CollaborationCreated,
        }
    }
}
