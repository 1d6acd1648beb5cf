pub mod events;
pub mod follow;
pub mod identity;
pub mod like;
pub mod notification;
pub mod view;

pub use events::{EventBus, ListenerId};
pub use follow::FollowService;
pub use identity::IdentityService;
pub use like::LikeService;
pub use notification::NotificationService;
pub use view::ViewService;
