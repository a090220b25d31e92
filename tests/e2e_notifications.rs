//! E2E tests for the notification composer

mod common;

use common::TestCore;
use streampanel::data::Notification;
use streampanel::error::AppError;
use streampanel::service::NoticeLevel;

#[tokio::test]
async fn broadcast_is_stored_with_no_target() {
    let mut ctx = TestCore::new();
    let admin = ctx.sign_in_admin().await;

    let composer = ctx.core.notification_composer();
    composer
        .send_broadcast("Maintenance", "Down at midnight")
        .await
        .unwrap();

    let repo = ctx.core.repository::<Notification>();
    let all = repo.list(None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Maintenance");
    assert_eq!(all[0].target_user_id, None);
    assert!(all[0].is_broadcast());
    assert_eq!(all[0].created_by, admin.identity_id);

    let notice = ctx.notices.recv().await.unwrap();
    assert_eq!(notice.message, "Notification sent to all users");
}

#[tokio::test]
async fn direct_notification_carries_its_target() {
    let ctx = TestCore::new();
    ctx.sign_in_admin().await;

    let composer = ctx.core.notification_composer();
    let sent = composer
        .send_direct("Your account", "Subscription extended", "user-42")
        .await
        .unwrap();

    assert_eq!(sent.target_user_id.as_deref(), Some("user-42"));
    assert!(!sent.is_broadcast());
}

#[tokio::test]
async fn sending_without_a_session_is_refused() {
    let mut ctx = TestCore::new();

    let composer = ctx.core.notification_composer();
    let result = composer.send_broadcast("Hello", "World").await;
    assert!(matches!(result, Err(AppError::Unauthorized)));

    let notice = ctx.notices.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "You must be logged in");

    // Nothing was stored
    let repo = ctx.core.repository::<Notification>();
    assert!(repo.list(None).await.unwrap().is_empty());
}
