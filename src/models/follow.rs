use serde::{Deserialize, Serialize};
use validator::Validate;

/// 反向索引：某个艺术家的粉丝列表，按被关注者存储。
///
/// `followers` 保持插入顺序，分页的稳定排序依赖它；
/// `followers_count == followers.len()` 恒成立。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowRecord {
    #[serde(default)]
    pub followers: Vec<String>,
    pub followers_count: u64,
}

impl FollowRecord {
    pub fn contains(&self, follower_id: &str) -> bool {
        self.followers.iter().any(|f| f == follower_id)
    }

    /// 录入粉丝，返回是否发生了变化
    pub fn add(&mut self, follower_id: &str) -> bool {
        if self.contains(follower_id) {
            return false;
        }
        self.followers.push(follower_id.to_string());
        self.followers_count += 1;
        true
    }

    /// 移除粉丝，返回是否发生了变化
    pub fn remove(&mut self, follower_id: &str) -> bool {
        if let Some(pos) = self.followers.iter().position(|f| f == follower_id) {
            self.followers.remove(pos);
            self.followers_count = self.followers_count.saturating_sub(1);
            true
        } else {
            false
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.followers_count == self.followers.len() as u64
    }
}

/// 正向索引：某个用户关注了哪些艺术家。
///
/// 与反向索引在同一次变更里一起维护，"我关注的人"列表因此不再
/// 需要全量扫描所有被关注者。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowingRecord {
    #[serde(default)]
    pub following: Vec<String>,
}

impl FollowingRecord {
    pub fn contains(&self, target_id: &str) -> bool {
        self.following.iter().any(|t| t == target_id)
    }

    pub fn add(&mut self, target_id: &str) -> bool {
        if self.contains(target_id) {
            return false;
        }
        self.following.push(target_id.to_string());
        true
    }

    pub fn remove(&mut self, target_id: &str) -> bool {
        if let Some(pos) = self.following.iter().position(|t| t == target_id) {
            self.following.remove(pos);
            true
        } else {
            false
        }
    }
}

/// 关注/取关操作的结果。
///
/// `changed=false` 表示这是一次冗余调用（重复关注或重复取关），
/// 没有任何副作用被触发。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FollowChange {
    pub active: bool,
    pub changed: bool,
    pub follower_count: u64,
}

/// 粉丝/关注列表的查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    /// 不透明分页游标；非法游标等价于第一页
    pub cursor: Option<String>,
    /// 大小写不敏感的子串搜索（姓名、院校、技能）
    pub query: Option<String>,
    /// 查看者ID，用于计算 `is_followed_by_me`
    pub current_user_id: Option<String>,
}

/// 列表条目，档案字段由档案目录在读取时反规范化拼装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowListItem {
    pub id: String,
    pub username: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub school: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// 查看者与该条目的关注关系，读取时实时计算，不落盘
    pub is_followed_by_me: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowListPage {
    pub items: Vec<FollowListItem>,
    pub has_more: bool,
    /// 下一页游标；最后一页为 None
    pub cursor: Option<String>,
}
