use crate::{
    adapters::{
        Dual, FollowStore, LikeStore, LocalBackend, NotificationStore, RemoteBackend, ViewStore,
    },
    config::Config,
    services::{
        EventBus, FollowService, IdentityService, LikeService, NotificationService, ViewService,
    },
    storage::{KeyValueStore, KvProfileDirectory, MemoryStore, ProfileDirectory},
};
use std::sync::Arc;
use tracing::info;

/// 应用程序的共享状态
/// 包含所有服务、事件总线和配置的引用
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 进程内事件总线
    pub events: EventBus,

    /// 艺术家档案目录
    pub profiles: Arc<dyn ProfileDirectory>,

    /// 行为人身份解析
    pub identity_service: IdentityService,

    /// 浏览计数服务
    pub view_service: ViewService,

    /// 点赞服务
    pub like_service: LikeService,

    /// 关注服务
    pub follow_service: FollowService,

    /// 通知服务
    pub notification_service: NotificationService,
}

impl AppState {
    /// 以内存键值缓存组装全部服务
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// 以注入的键值缓存组装全部服务。
    ///
    /// 配置了远程存储时，每个领域都是"远程为主、本地为备"的双后端；
    /// 没配置时一切都落在本地缓存上。
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let profiles: Arc<dyn ProfileDirectory> =
            Arc::new(KvProfileDirectory::new(store.clone()));
        let local = Arc::new(LocalBackend::new(store.clone(), profiles.clone()));
        let events = EventBus::new();

        let remote = config
            .remote_api_url
            .as_deref()
            .map(|url| Arc::new(RemoteBackend::new(url, config.remote_api_token.clone())));
        match &remote {
            Some(_) => info!("Remote store configured, local cache acts as fallback"),
            None => info!("No remote store configured, running on local cache only"),
        }

        let view_backends: Dual<dyn ViewStore> = match &remote {
            Some(remote) => Dual::new(remote.clone(), local.clone()),
            None => Dual::single(local.clone()),
        };
        let like_backends: Dual<dyn LikeStore> = match &remote {
            Some(remote) => Dual::new(remote.clone(), local.clone()),
            None => Dual::single(local.clone()),
        };
        let follow_backends: Dual<dyn FollowStore> = match &remote {
            Some(remote) => Dual::new(remote.clone(), local.clone()),
            None => Dual::single(local.clone()),
        };
        let notification_backends: Dual<dyn NotificationStore> = match &remote {
            Some(remote) => Dual::new(remote.clone(), local.clone()),
            None => Dual::single(local.clone()),
        };

        let identity_service = IdentityService::new(store);
        let view_service = ViewService::new(view_backends);
        let notification_service =
            NotificationService::new(notification_backends, events.clone());
        let like_service = LikeService::new(like_backends, notification_service.clone());
        let follow_service = FollowService::new(
            follow_backends,
            notification_service.clone(),
            events.clone(),
            &config,
        );

        Self {
            config,
            events,
            profiles,
            identity_service,
            view_service,
            like_service,
            follow_service,
            notification_service,
        }
    }
}
