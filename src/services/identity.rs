use crate::models::{ActorKey, AuthUser, ClientSignals};
use crate::storage::{keys, KeyValueStore};
use crate::utils::fingerprint;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// 行为人身份解析。
///
/// 登录用户直接用上游认证层给出的用户ID；匿名访客基于浏览器信号
/// 计算指纹，算出来后缓存到本地，同一浏览器后续的访问复用同一个
/// 指纹，浏览去重的口径才稳定。
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn KeyValueStore>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 解析本次调用的行为人。
    ///
    /// 永不失败：缓存读写故障只是退化成每次重算指纹，信号全缺时
    /// 退化成随机种子指纹（见 `fingerprint::from_signals`）。
    pub async fn resolve_actor(&self, user: Option<&AuthUser>, signals: &ClientSignals) -> ActorKey {
        if let Some(user) = user {
            return ActorKey::user(user.id.clone());
        }

        match self.store.get(keys::VISITOR_FINGERPRINT).await {
            Ok(Some(Value::String(cached))) if !cached.is_empty() => {
                return ActorKey::visitor(cached);
            }
            Ok(_) => {}
            Err(e) => warn!("Fingerprint cache read failed, recomputing: {}", e),
        }

        let fingerprint = fingerprint::from_signals(signals);
        if let Err(e) = self
            .store
            .put(keys::VISITOR_FINGERPRINT, Value::String(fingerprint.clone()))
            .await
        {
            warn!("Fingerprint cache write failed: {}", e);
        }
        debug!("Resolved a new visitor fingerprint");
        ActorKey::visitor(fingerprint)
    }
}
