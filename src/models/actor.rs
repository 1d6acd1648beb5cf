use serde::{Deserialize, Serialize};
use std::fmt;

/// 计数操作的行为人标识。
///
/// 同一次调用只会有一个身份：已登录用户用 `user:<id>`，匿名访客用
/// `visitor:<指纹>`。去重集合、点赞成员表都以它的规范字符串为键。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorKey {
    User(String),
    Visitor(String),
}

impl ActorKey {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    pub fn visitor(fingerprint: impl Into<String>) -> Self {
        Self::Visitor(fingerprint.into())
    }

    /// 规范字符串形式，作为成员表里的键
    pub fn key(&self) -> String {
        match self {
            Self::User(id) => format!("user:{}", id),
            Self::Visitor(fp) => format!("visitor:{}", fp),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// 已登录用户的ID；匿名访客返回 None
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User(id) => Some(id),
            Self::Visitor(_) => None,
        }
    }
}

impl fmt::Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 上游认证层已解析好的用户，本层不做任何鉴权
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

impl AuthUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// 浏览器环境信号，由UI层采集后传入。
///
/// 所有字段都允许缺失，指纹计算必须在任何信号不可用时平滑降级。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSignals {
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub color_depth: Option<u8>,
    /// 时区偏移，单位分钟
    pub timezone_offset: Option<i32>,
    pub hardware_concurrency: Option<u32>,
    /// 设备内存，单位GB
    pub device_memory: Option<f64>,
    pub platform: Option<String>,
    pub pixel_ratio: Option<f64>,
    pub max_touch_points: Option<u32>,
    /// Canvas渲染哈希，由采集端计算
    pub canvas_hash: Option<String>,
}

impl ClientSignals {
    /// 是否一个信号都没有采集到
    pub fn is_empty(&self) -> bool {
        self.user_agent.is_none()
            && self.language.is_none()
            && self.screen_width.is_none()
            && self.screen_height.is_none()
            && self.color_depth.is_none()
            && self.timezone_offset.is_none()
            && self.hardware_concurrency.is_none()
            && self.device_memory.is_none()
            && self.platform.is_none()
            && self.pixel_ratio.is_none()
            && self.max_touch_points.is_none()
            && self.canvas_hash.is_none()
    }
}
