//! 作品集社区的社交计数与同步层。
//!
//! 浏览、点赞、关注、通知四个领域各自一个服务，全部通过
//! [`state::AppState`] 组装。每个服务背后是一对可互换的后端：
//! 权威远程存储为主，本地键值缓存兜底，远程故障时单次降级。
//!
//! ```no_run
//! use atelier_social::{AppState, Config};
//! use atelier_social::models::ActorKey;
//!
//! # async fn demo() -> atelier_social::Result<()> {
//! let state = AppState::new(Config::default());
//! let outcome = state
//!     .view_service
//!     .record_view("artwork-1", &ActorKey::visitor("fp-1"))
//!     .await?;
//! assert!(outcome.is_new_view);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result, StoreError, StoreResult};
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志
///
/// 宿主应用有自己的订阅器时不要调用；重复初始化会panic，
/// 这里沿用环境变量 `LOG_LEVEL` 控制过滤。
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("LOG_LEVEL").unwrap_or_else(|_| "atelier_social=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
