use crate::adapters::ViewBackends;
use crate::error::Result;
use crate::models::{ActorKey, ViewOutcome};
use dashmap::DashMap;
use futures::FutureExt;
use std::sync::Arc;
use tracing::debug;

/// 浏览计数服务。
///
/// 幂等性有两道闸：进程内的会话标记把同一 (主题, 行为人) 的重复
/// 上报直接短路掉，后端的去重集合兜住跨进程、跨会话的重复。短路
/// 返回的是标记时刻的计数，不保证反映其他人之后带来的增长。
#[derive(Clone)]
pub struct ViewService {
    backends: ViewBackends,
    session_marks: Arc<DashMap<String, u64>>,
}

impl ViewService {
    pub fn new(backends: ViewBackends) -> Self {
        Self {
            backends,
            session_marks: Arc::new(DashMap::new()),
        }
    }

    pub async fn record_view(&self, subject_id: &str, actor: &ActorKey) -> Result<ViewOutcome> {
        let mark_key = format!("{}::{}", subject_id, actor.key());
        if let Some(count) = self.session_marks.get(&mark_key) {
            debug!("View on {} by {} already marked this session", subject_id, actor);
            return Ok(ViewOutcome {
                view_count: *count,
                is_new_view: false,
            });
        }

        let outcome = self
            .backends
            .run("record_view", |backend| {
                let subject_id = subject_id.to_string();
                let actor = actor.clone();
                async move { backend.record_view(&subject_id, &actor).await }.boxed()
            })
            .await?;

        self.session_marks.insert(mark_key, outcome.view_count);
        debug!(
            "View on {} by {} recorded, count={} new={}",
            subject_id, actor, outcome.view_count, outcome.is_new_view
        );
        Ok(outcome)
    }

    pub async fn get_view_count(&self, subject_id: &str) -> Result<u64> {
        self.backends
            .run("view_count", |backend| {
                let subject_id = subject_id.to_string();
                async move { backend.view_count(&subject_id).await }.boxed()
            })
            .await
    }
}
