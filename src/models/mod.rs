pub mod actor;
pub mod event;
pub mod follow;
pub mod like;
pub mod notification;
pub mod profile;
pub mod view;

// 重新导出常用类型
pub use actor::{ActorKey, AuthUser, ClientSignals};
pub use event::{AppEvent, EventKind, FollowOperation};
pub use follow::{FollowChange, FollowListItem, FollowListPage, ListQuery};
pub use like::LikeToggle;
pub use notification::{CreateNotificationRequest, Notification, NotificationType};
pub use profile::ArtistProfile;
pub use view::ViewOutcome;
