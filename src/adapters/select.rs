use crate::adapters::backend::{FollowStore, LikeStore, NotificationStore, ViewStore};
use crate::error::{Result, StoreResult};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 按领域组出来的主/备后端对
pub type ViewBackends = Dual<dyn ViewStore>;
pub type LikeBackends = Dual<dyn LikeStore>;
pub type FollowBackends = Dual<dyn FollowStore>;
pub type NotificationBackends = Dual<dyn NotificationStore>;

/// 主/备双后端选择器。
///
/// 每次调用独立选择：先打主后端，失败且可恢复时在同一次调用内
/// 降级到备用后端重放一次，之后不再重试，也不记忆失败状态——
/// 下一次调用仍然从主后端开始。备用侧也失败时返回备用侧的错误。
///
/// 致命错误（请求被拒绝一类）不降级，直接上抛。
pub struct Dual<S: ?Sized> {
    primary: Arc<S>,
    fallback: Arc<S>,
}

impl<S: ?Sized> Clone for Dual<S> {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<S: ?Sized> Dual<S> {
    pub fn new(primary: Arc<S>, fallback: Arc<S>) -> Self {
        Self { primary, fallback }
    }

    /// 没有远程存储时的退化形态：主备都是同一个本地后端
    pub fn single(backend: Arc<S>) -> Self {
        Self {
            primary: backend.clone(),
            fallback: backend,
        }
    }

    /// 执行一次操作。`op` 只用于日志。
    ///
    /// 闭包对同一后端引用可能被调用两次（主、备各一次），捕获的
    /// 参数需要在闭包体内克隆成自有数据。
    pub async fn run<T, F>(&self, op: &str, call: F) -> Result<T>
    where
        F: for<'a> Fn(&'a S) -> BoxFuture<'a, StoreResult<T>>,
    {
        match call(self.primary.as_ref()).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_recoverable() => {
                warn!("{} failed on primary backend, trying fallback: {}", op, e);
                match call(self.fallback.as_ref()).await {
                    Ok(value) => {
                        debug!("{} served by fallback backend", op);
                        Ok(value)
                    }
                    Err(fallback_err) => {
                        error!("{} failed on both backends: {}", op, fallback_err);
                        Err(fallback_err.into())
                    }
                }
            }
            Err(e) => {
                error!("{} rejected by primary backend: {}", op, e);
                Err(e.into())
            }
        }
    }
}
