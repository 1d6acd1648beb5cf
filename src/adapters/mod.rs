pub mod backend;
pub mod local;
pub mod remote;
pub mod select;

// 重新导出常用类型
pub use backend::{FollowStore, LikeStore, NotificationStore, ViewStore};
pub use local::LocalBackend;
pub use remote::RemoteBackend;
pub use select::{Dual, FollowBackends, LikeBackends, NotificationBackends, ViewBackends};
