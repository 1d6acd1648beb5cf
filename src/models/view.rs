use crate::models::actor::ActorKey;
use serde::{Deserialize, Serialize};

/// 单个作品的浏览记录，按主体惰性创建。
///
/// 不变式：`total_views == user_views.len() + visitor_views.len()`，
/// 且同一个行为人只会出现在其中一个集合里。浏览是单调计数，成员
/// 只增不减。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewRecord {
    pub total_views: u64,
    #[serde(default)]
    pub user_views: Vec<String>,
    #[serde(default)]
    pub visitor_views: Vec<String>,
}

impl ViewRecord {
    pub fn contains(&self, actor: &ActorKey) -> bool {
        match actor {
            ActorKey::User(id) => self.user_views.iter().any(|v| v == id),
            ActorKey::Visitor(fp) => self.visitor_views.iter().any(|v| v == fp),
        }
    }

    /// 准入判定：不在集合中则录入并加一，返回是否是新浏览
    pub fn admit(&mut self, actor: &ActorKey) -> bool {
        if self.contains(actor) {
            return false;
        }
        match actor {
            ActorKey::User(id) => self.user_views.push(id.clone()),
            ActorKey::Visitor(fp) => self.visitor_views.push(fp.clone()),
        }
        self.total_views += 1;
        true
    }

    pub fn is_consistent(&self) -> bool {
        self.total_views == (self.user_views.len() + self.visitor_views.len()) as u64
    }
}

/// `record_view` 的返回：最新计数与本次是否计入
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewOutcome {
    pub view_count: u64,
    pub is_new_view: bool,
}
