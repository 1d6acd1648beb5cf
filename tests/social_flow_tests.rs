//! 端到端走查：从 AppState 组装出来的服务链路，覆盖
//! 浏览去重、点赞翻转、关注列表、通知与事件广播，以及
//! 远程后端在场时的选择与降级。

use atelier_social::models::{
    ActorKey, AppEvent, ArtistProfile, AuthUser, ClientSignals, EventKind, ListQuery,
};
use atelier_social::storage::{KeyValueStore, MemoryStore, ProfileDirectory};
use atelier_social::{AppError, AppState, Config};
use parking_lot::Mutex;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn local_state() -> AppState {
    AppState::new(Config::default())
}

fn remote_config(server: &MockServer) -> Config {
    Config {
        remote_api_url: Some(server.uri()),
        ..Config::default()
    }
}

async fn seed_profile(state: &AppState, user_id: &str, display_name: &str, school: Option<&str>) {
    state
        .profiles
        .upsert_profile(&ArtistProfile {
            user_id: user_id.to_string(),
            username: Some(user_id.to_string()),
            display_name: display_name.to_string(),
            avatar_url: Some(format!("https://cdn.example.com/{}.png", user_id)),
            school: school.map(|s| s.to_string()),
            skills: vec!["illustration".to_string()],
            bio: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn visitor_views_count_once_per_fingerprint() {
    let state = local_state();
    let visitor = state
        .identity_service
        .resolve_actor(None, &ClientSignals::default())
        .await;

    let first = state
        .view_service
        .record_view("artwork-1", &visitor)
        .await
        .unwrap();
    assert_eq!(first.view_count, 1);
    assert!(first.is_new_view);

    // 同一访客刷两次页面，计数不动
    for _ in 0..2 {
        let repeat = state
            .view_service
            .record_view("artwork-1", &visitor)
            .await
            .unwrap();
        assert_eq!(repeat.view_count, 1);
        assert!(!repeat.is_new_view);
    }

    // 登录用户是另一个行为人
    let alice = state
        .identity_service
        .resolve_actor(Some(&AuthUser::new("alice")), &ClientSignals::default())
        .await;
    let from_alice = state
        .view_service
        .record_view("artwork-1", &alice)
        .await
        .unwrap();
    assert_eq!(from_alice.view_count, 2);
    assert!(from_alice.is_new_view);
}

#[tokio::test]
async fn like_toggle_round_trip_notifies_owner_once() {
    let state = local_state();
    let bryan = ActorKey::user("bryan");

    let liked = state
        .like_service
        .toggle_like("artwork-1", &bryan, Some("alice"))
        .await
        .unwrap();
    assert!(liked.active);
    assert_eq!(liked.like_count, 1);

    let unliked = state
        .like_service
        .toggle_like("artwork-1", &bryan, Some("alice"))
        .await
        .unwrap();
    assert!(!unliked.active);
    assert_eq!(unliked.like_count, 0);

    // 点赞-取消一个来回，作者只收到最初那一条通知
    let inbox = state
        .notification_service
        .list_notifications("alice", None)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title, "New like");
}

#[tokio::test]
async fn follow_flow_reaches_list_notification_and_event() {
    let state = local_state();
    seed_profile(&state, "bryan", "Bryan Ito", Some("Tokyo Arts")).await;

    let follow_events = Arc::new(Mutex::new(Vec::new()));
    let sink = follow_events.clone();
    state.events.subscribe(EventKind::FollowChanged, move |e| {
        sink.lock().push(e.clone());
    });

    let change = state
        .follow_service
        .follow_artist("bryan", "alice")
        .await
        .unwrap();
    assert!(change.active && change.changed);
    assert_eq!(change.follower_count, 1);

    // 粉丝列表带档案字段，查看者carol没关注bryan
    let page = state
        .follow_service
        .get_followers(
            "alice",
            &ListQuery {
                current_user_id: Some("carol".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].display_name, "Bryan Ito");
    assert!(!page.items[0].is_followed_by_me);
    assert!(!page.has_more);

    // 通知与事件各恰好一次
    assert_eq!(
        state
            .notification_service
            .get_unread_count("alice")
            .await
            .unwrap(),
        1
    );
    assert_eq!(follow_events.lock().len(), 1);

    // 取关发事件但不发通知
    state
        .follow_service
        .unfollow_artist("bryan", "alice")
        .await
        .unwrap();
    assert_eq!(follow_events.lock().len(), 2);
    assert_eq!(
        state
            .notification_service
            .get_unread_count("alice")
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let state = local_state();
    let err = state
        .follow_service
        .follow_artist("alice", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn unread_badge_flow() {
    let state = local_state();

    let unread_pings = Arc::new(Mutex::new(0));
    let sink = unread_pings.clone();
    state.events.subscribe(EventKind::UnreadChanged, move |e| {
        assert!(matches!(e, AppEvent::UnreadChanged { user_id } if user_id == "alice"));
        *sink.lock() += 1;
    });

    state
        .follow_service
        .follow_artist("bryan", "alice")
        .await
        .unwrap();
    state
        .follow_service
        .follow_artist("carol", "alice")
        .await
        .unwrap();
    assert_eq!(
        state
            .notification_service
            .get_unread_count("alice")
            .await
            .unwrap(),
        2
    );

    let flipped = state
        .notification_service
        .mark_all_as_read("alice")
        .await
        .unwrap();
    assert_eq!(flipped, 2);
    assert_eq!(
        state
            .notification_service
            .get_unread_count("alice")
            .await
            .unwrap(),
        0
    );

    // 两次落库 + 一次全部已读 = 三次未读数广播
    assert_eq!(*unread_pings.lock(), 3);
}

#[tokio::test]
async fn follower_search_is_case_insensitive_and_pages_cleanly() {
    let state = local_state();
    seed_profile(&state, "u1", "Mei Lin", Some("Tokyo Arts")).await;
    seed_profile(&state, "u2", "Sora Tan", Some("Kyoto Design")).await;
    seed_profile(&state, "u3", "Lin Feng", Some("Shanghai Academy")).await;
    seed_profile(&state, "u4", "Noa Berlin", None).await;

    for follower in ["u1", "u2", "u3", "u4"] {
        state
            .follow_service
            .follow_artist(follower, "alice")
            .await
            .unwrap();
    }

    // "lin" 命中 Mei Lin、Lin Feng、Noa Berlin
    let query = ListQuery {
        limit: Some(2),
        query: Some("LIN".to_string()),
        ..Default::default()
    };
    let first = state
        .follow_service
        .get_followers("alice", &query)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert!(first.has_more);

    let second = state
        .follow_service
        .get_followers(
            "alice",
            &ListQuery {
                cursor: first.cursor.clone(),
                ..query
            },
        )
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert!(!second.has_more);
    assert!(second.cursor.is_none());

    let mut matched: Vec<String> = first
        .items
        .into_iter()
        .chain(second.items.into_iter())
        .map(|i| i.id)
        .collect();
    matched.sort();
    assert_eq!(matched, vec!["u1", "u3", "u4"]);
}

#[tokio::test]
async fn garbage_cursor_falls_back_to_first_page() {
    let state = local_state();
    for follower in ["u1", "u2"] {
        state
            .follow_service
            .follow_artist(follower, "alice")
            .await
            .unwrap();
    }

    let page = state
        .follow_service
        .get_followers(
            "alice",
            &ListQuery {
                cursor: Some("!!not-a-cursor!!".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.items[0].id, "u1");
}

#[tokio::test]
async fn oversized_offset_cursor_degrades_to_an_empty_page() {
    let state = local_state();
    for follower in ["u1", "u2"] {
        state
            .follow_service
            .follow_artist(follower, "alice")
            .await
            .unwrap();
    }

    // 格式正确但偏移量是usize::MAX的恶意游标：空页收尾，不报错
    let page = state
        .follow_service
        .get_followers(
            "alice",
            &ListQuery {
                cursor: Some(atelier_social::utils::cursor::encode(usize::MAX)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_more);
    assert!(page.cursor.is_none());
}

#[tokio::test]
async fn remote_backend_serves_when_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc/views/increment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "view_count": 41,
            "is_new_view": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::with_store(remote_config(&server), Arc::new(MemoryStore::new()));
    let outcome = state
        .view_service
        .record_view("artwork-1", &ActorKey::visitor("fp-1"))
        .await
        .unwrap();

    // 计数来自远程，不是本地的1
    assert_eq!(outcome.view_count, 41);
    assert!(outcome.is_new_view);
}

#[tokio::test]
async fn remote_outage_falls_back_to_local_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc/likes/toggle"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let state = AppState::with_store(remote_config(&server), store.clone());

    let toggle = state
        .like_service
        .toggle_like("artwork-1", &ActorKey::user("bryan"), None)
        .await
        .unwrap();
    assert!(toggle.active);
    assert_eq!(toggle.like_count, 1);

    // 真落在了本地缓存
    assert!(store
        .get("tag_artwork_likes_artwork-1")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn missing_remote_table_falls_back_to_local_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc/follows/count"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let state = AppState::with_store(remote_config(&server), Arc::new(MemoryStore::new()));
    let count = state
        .follow_service
        .get_follower_count("alice")
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn remote_rejection_surfaces_instead_of_falling_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc/follows/create"))
        .respond_with(ResponseTemplate::new(400).set_body_string("malformed pair"))
        .mount(&server)
        .await;

    let state = AppState::with_store(remote_config(&server), Arc::new(MemoryStore::new()));
    let err = state
        .follow_service
        .follow_artist("bryan", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExternalService(_)));

    // 被拒绝的操作不会偷偷写进本地
    assert_eq!(
        state.follow_service.get_follower_count("alice").await.unwrap(),
        0
    );
}

#[tokio::test]
async fn backend_selection_is_per_call() {
    let server = MockServer::start().await;
    // 第一次调用命中这个只响应一次的故障mock
    Mock::given(method("POST"))
        .and(path("/rpc/views/count"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // 之后远程恢复
    Mock::given(method("POST"))
        .and(path("/rpc/views/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": 9 })))
        .mount(&server)
        .await;

    let state = AppState::with_store(remote_config(&server), Arc::new(MemoryStore::new()));

    // 降级到本地：没人看过，0
    assert_eq!(state.view_service.get_view_count("artwork-1").await.unwrap(), 0);
    // 远程恢复后下一次调用重新从远程拿数
    assert_eq!(state.view_service.get_view_count("artwork-1").await.unwrap(), 9);
}

#[tokio::test]
async fn event_bus_carries_editor_and_collaboration_events() {
    // 草稿自动保存、协作申请这类事件由外围产品发布，
    // 本层的总线负责派发
    let state = local_state();
    let drafts = Arc::new(Mutex::new(Vec::new()));
    let sink = drafts.clone();
    state.events.subscribe(EventKind::DraftSaved, move |e| {
        sink.lock().push(e.clone());
    });
    let collabs = Arc::new(Mutex::new(0));
    let sink = collabs.clone();
    state
        .events
        .subscribe(EventKind::CollaborationCreated, move |_| {
            *sink.lock() += 1;
        });

    state.events.publish(&AppEvent::DraftSaved {
        draft_id: "draft-7".to_string(),
    });
    state.events.publish(&AppEvent::CollaborationCreated {
        collaboration_id: "collab-1".to_string(),
    });

    assert_eq!(
        *drafts.lock(),
        vec![AppEvent::DraftSaved {
            draft_id: "draft-7".to_string()
        }]
    );
    assert_eq!(*collabs.lock(), 1);
}

#[tokio::test]
async fn visitor_identity_is_stable_across_calls() {
    let state = local_state();
    let signals = ClientSignals {
        user_agent: Some("Mozilla/5.0".to_string()),
        language: Some("ja-JP".to_string()),
        screen_width: Some(1920),
        screen_height: Some(1080),
        ..Default::default()
    };

    let first = state.identity_service.resolve_actor(None, &signals).await;
    let second = state.identity_service.resolve_actor(None, &signals).await;
    assert_eq!(first, second);

    // 两次解析映射到同一个行为人，浏览只算一次
    state
        .view_service
        .record_view("artwork-1", &first)
        .await
        .unwrap();
    let repeat = state
        .view_service
        .record_view("artwork-1", &second)
        .await
        .unwrap();
    assert!(!repeat.is_new_view);
    assert_eq!(repeat.view_count, 1);
}
