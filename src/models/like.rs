use crate::models::actor::ActorKey;
use serde::{Deserialize, Serialize};

/// 单个作品的点赞记录。
///
/// 与浏览不同，点赞是可逆的成员表：`total_likes == liked_by.len()`，
/// 成员键是行为人的规范字符串（`user:<id>` 或 `visitor:<指纹>`）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LikeRecord {
    pub total_likes: u64,
    #[serde(default)]
    pub liked_by: Vec<String>,
}

impl LikeRecord {
    pub fn contains(&self, actor: &ActorKey) -> bool {
        let key = actor.key();
        self.liked_by.iter().any(|k| *k == key)
    }

    /// 对称准入：在表中则移除减一，否则录入加一。返回切换后的状态。
    /// 计数用饱和减法兜底，绝不为负。
    pub fn toggle(&mut self, actor: &ActorKey) -> bool {
        let key = actor.key();
        if let Some(pos) = self.liked_by.iter().position(|k| *k == key) {
            self.liked_by.remove(pos);
            self.total_likes = self.total_likes.saturating_sub(1);
            false
        } else {
            self.liked_by.push(key);
            self.total_likes += 1;
            true
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.total_likes == self.liked_by.len() as u64
    }
}

/// `toggle_like` 的返回：切换后的状态与计数
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LikeToggle {
    pub active: bool,
    pub like_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut record = LikeRecord::default();
        let actor = ActorKey::user("alice");

        assert!(record.toggle(&actor));
        assert_eq!(record.total_likes, 1);
        assert!(!record.toggle(&actor));
        assert_eq!(record.total_likes, 0);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_count_never_goes_negative() {
        // 损坏的记录：计数为零但表里还有成员
        let mut record = LikeRecord {
            total_likes: 0,
            liked_by: vec!["user:alice".to_string()],
        };
        record.toggle(&ActorKey::user("alice"));
        assert_eq!(record.total_likes, 0);
    }
}
