use serde::{Deserialize, Serialize};

/// 艺术家档案的读取侧视图。
///
/// 档案的创建和编辑属于外围产品，本层只在拼装列表条目和搜索文本时
/// 读取它。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub user_id: String,
    pub username: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub school: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub bio: Option<String>,
}

impl ArtistProfile {
    /// 反规范化的搜索文本：姓名、院校、技能拼成一个小写串，
    /// 搜索按子串匹配命中
    pub fn search_blob(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.push(&self.display_name);
        if let Some(username) = &self.username {
            parts.push(username);
        }
        if let Some(school) = &self.school {
            parts.push(school);
        }
        for skill in &self.skills {
            parts.push(skill);
        }
        parts.join(" ").to_lowercase()
    }
}
