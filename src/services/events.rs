use crate::models::{AppEvent, EventKind};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

pub type ListenerId = u64;

type Listener = Arc<dyn Fn(&AppEvent) + Send + Sync>;

struct Registration {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    listeners: RwLock<Vec<Registration>>,
}

/// 进程内类型化事件总线。
///
/// 发布是同步的：`publish` 返回时所有匹配的监听器已按注册顺序
/// 执行完毕。派发前先对监听器列表做快照并释放锁，监听器回调里
/// 再订阅或退订不会死锁，也不影响当前这次派发。
///
/// 总线不跨进程、不去重、不持久化，监听者应当以"收到信号后重新
/// 拉取"的方式消费。
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅某一类事件，返回的ID用于退订
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.listeners.write().push(Registration {
            id,
            kind,
            listener: Arc::new(listener),
        });
        id
    }

    /// 退订；未知ID返回 false
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.write();
        let before = listeners.len();
        listeners.retain(|r| r.id != id);
        listeners.len() != before
    }

    pub fn publish(&self, event: &AppEvent) {
        let kind = event.kind();
        let snapshot: Vec<Listener> = self
            .inner
            .listeners
            .read()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.listener.clone())
            .collect();

        debug!("Publishing {} to {} listener(s)", kind.name(), snapshot.len());
        for listener in snapshot {
            listener(event);
        }
    }
}
