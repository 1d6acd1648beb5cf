use crate::adapters::backend::{FollowStore, LikeStore, NotificationStore, ViewStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    ActorKey, FollowChange, FollowListPage, LikeToggle, ListQuery, Notification, ViewOutcome,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

/// 权威远程存储的RPC客户端。
///
/// 所有操作走 POST + JSON，行级读写由远端执行。错误分两类：
/// 传输失败、404（表尚未建出来）、5xx 和响应解码失败都算可恢复，
/// 调用方可以降级到本地缓存；其余 4xx 说明请求本身被拒绝，重放
/// 到本地也不会是对的，按致命处理。
///
/// 客户端不设超时：挂起的调用只会阻塞发起它的那次交互。
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_token,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn call<B, T>(&self, path: &str, body: &B) -> StoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.endpoint(path)).json(body);
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::recoverable(format!("Remote call {} failed: {}", path, e)))?;

        let status = response.status();
        if status.is_success() {
            debug!("Remote call {} succeeded", path);
            return response.json::<T>().await.map_err(|e| {
                StoreError::recoverable(format!("Undecodable response from {}: {}", path, e))
            });
        }

        let detail = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND || status.is_server_error() {
            Err(StoreError::recoverable(format!(
                "Remote call {} returned {}: {}",
                path, status, detail
            )))
        } else {
            Err(StoreError::fatal(format!(
                "Remote call {} rejected ({}): {}",
                path, status, detail
            )))
        }
    }
}

#[derive(Serialize)]
struct SubjectActorBody<'a> {
    subject_id: &'a str,
    actor: String,
}

#[derive(Serialize)]
struct SubjectBody<'a> {
    subject_id: &'a str,
}

#[derive(Serialize)]
struct FollowPairBody<'a> {
    follower_id: &'a str,
    target_id: &'a str,
}

#[derive(Serialize)]
struct TargetBody<'a> {
    target_id: &'a str,
}

#[derive(Serialize)]
struct ListBody<'a> {
    subject_id: &'a str,
    limit: Option<u32>,
    cursor: Option<&'a str>,
    query: Option<&'a str>,
    current_user_id: Option<&'a str>,
}

impl<'a> ListBody<'a> {
    fn new(subject_id: &'a str, query: &'a ListQuery) -> Self {
        Self {
            subject_id,
            limit: query.limit,
            cursor: query.cursor.as_deref(),
            query: query.query.as_deref(),
            current_user_id: query.current_user_id.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct ReceiverBody<'a> {
    receiver_id: &'a str,
}

#[derive(Serialize)]
struct ReceiverLimitBody<'a> {
    receiver_id: &'a str,
    limit: usize,
}

#[derive(Serialize)]
struct MarkReadBody<'a> {
    receiver_id: &'a str,
    notification_id: &'a str,
}

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Deserialize)]
struct StatusResponse {
    active: bool,
}

#[derive(Deserialize)]
struct UpdatedResponse {
    updated: u64,
}

#[async_trait]
impl ViewStore for RemoteBackend {
    async fn record_view(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<ViewOutcome> {
        let body = SubjectActorBody {
            subject_id,
            actor: actor.key(),
        };
        self.call("/rpc/views/increment", &body).await
    }

    async fn view_count(&self, subject_id: &str) -> StoreResult<u64> {
        let response: CountResponse = self
            .call("/rpc/views/count", &SubjectBody { subject_id })
            .await?;
        Ok(response.count)
    }
}

#[async_trait]
impl LikeStore for RemoteBackend {
    async fn toggle_like(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<LikeToggle> {
        let body = SubjectActorBody {
            subject_id,
            actor: actor.key(),
        };
        self.call("/rpc/likes/toggle", &body).await
    }

    async fn like_status(&self, subject_id: &str, actor: &ActorKey) -> StoreResult<bool> {
        let body = SubjectActorBody {
            subject_id,
            actor: actor.key(),
        };
        let response: StatusResponse = self.call("/rpc/likes/status", &body).await?;
        Ok(response.active)
    }

    async fn like_count(&self, subject_id: &str) -> StoreResult<u64> {
        let response: CountResponse = self
            .call("/rpc/likes/count", &SubjectBody { subject_id })
            .await?;
        Ok(response.count)
    }
}

#[async_trait]
impl FollowStore for RemoteBackend {
    async fn follow(&self, follower_id: &str, target_id: &str) -> StoreResult<FollowChange> {
        let body = FollowPairBody {
            follower_id,
            target_id,
        };
        self.call("/rpc/follows/create", &body).await
    }

    async fn unfollow(&self, follower_id: &str, target_id: &str) -> StoreResult<FollowChange> {
        let body = FollowPairBody {
            follower_id,
            target_id,
        };
        self.call("/rpc/follows/delete", &body).await
    }

    async fn follow_status(&self, follower_id: &str, target_id: &str) -> StoreResult<bool> {
        let body = FollowPairBody {
            follower_id,
            target_id,
        };
        let response: StatusResponse = self.call("/rpc/follows/status", &body).await?;
        Ok(response.active)
    }

    async fn follower_count(&self, target_id: &str) -> StoreResult<u64> {
        let response: CountResponse = self
            .call("/rpc/follows/count", &TargetBody { target_id })
            .await?;
        Ok(response.count)
    }

    async fn list_followers(
        &self,
        target_id: &str,
        query: &ListQuery,
    ) -> StoreResult<FollowListPage> {
        self.call("/rpc/follows/followers", &ListBody::new(target_id, query))
            .await
    }

    async fn list_following(
        &self,
        user_id: &str,
        query: &ListQuery,
    ) -> StoreResult<FollowListPage> {
        self.call("/rpc/follows/following", &ListBody::new(user_id, query))
            .await
    }
}

#[async_trait]
impl NotificationStore for RemoteBackend {
    async fn insert_notification(&self, notification: &Notification) -> StoreResult<()> {
        let _: serde_json::Value = self.call("/rpc/notifications/insert", notification).await?;
        Ok(())
    }

    async fn list_notifications(
        &self,
        receiver_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<Notification>> {
        let body = ReceiverLimitBody { receiver_id, limit };
        self.call("/rpc/notifications/list", &body).await
    }

    async fn unread_count(&self, receiver_id: &str) -> StoreResult<u64> {
        let response: CountResponse = self
            .call("/rpc/notifications/unread_count", &ReceiverBody { receiver_id })
            .await?;
        Ok(response.count)
    }

    async fn mark_read(&self, receiver_id: &str, notification_id: &str) -> StoreResult<bool> {
        let body = MarkReadBody {
            receiver_id,
            notification_id,
        };
        let response: UpdatedResponse = self.call("/rpc/notifications/mark_read", &body).await?;
        Ok(response.updated > 0)
    }

    async fn mark_all_read(&self, receiver_id: &str) -> StoreResult<u64> {
        let response: UpdatedResponse = self
            .call("/rpc/notifications/mark_all_read", &ReceiverBody { receiver_id })
            .await?;
        Ok(response.updated)
    }
}
