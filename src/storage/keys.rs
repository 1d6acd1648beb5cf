//! 本地缓存的键约定：前缀 + 主体ID。
//!
//! 这些键名是产品既有的存储接口，其他组件（以及历史数据）都依赖它，
//! 不要改动。

/// 作品浏览记录
pub const ARTWORK_VIEWS: &str = "tag_artwork_views";
/// 作品点赞记录
pub const ARTWORK_LIKES: &str = "tag_artwork_likes";
/// 艺术家粉丝（反向索引）
pub const ARTIST_FOLLOWS: &str = "tag_artist_follows";
/// 用户关注（正向索引）
pub const ARTIST_FOLLOWING: &str = "tag_artist_following";
/// 按接收者命名空间的通知列表
pub const NOTIFICATIONS: &str = "tag_notifications";
/// 艺术家档案
pub const ARTIST_PROFILE: &str = "tag_artist_profile";
/// 访客指纹的单例键
pub const VISITOR_FINGERPRINT: &str = "tag_visitor_fingerprint";

pub fn artwork_views(artwork_id: &str) -> String {
    format!("{}_{}", ARTWORK_VIEWS, artwork_id)
}

pub fn artwork_likes(artwork_id: &str) -> String {
    format!("{}_{}", ARTWORK_LIKES, artwork_id)
}

pub fn artist_follows(target_id: &str) -> String {
    format!("{}_{}", ARTIST_FOLLOWS, target_id)
}

pub fn artist_following(follower_id: &str) -> String {
    format!("{}_{}", ARTIST_FOLLOWING, follower_id)
}

pub fn notifications(receiver_id: &str) -> String {
    format!("{}_{}", NOTIFICATIONS, receiver_id)
}

pub fn artist_profile(user_id: &str) -> String {
    format!("{}_{}", ARTIST_PROFILE, user_id)
}
