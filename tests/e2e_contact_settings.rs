//! E2E tests for the singleton contact settings

mod common;

use common::TestCore;
use streampanel::data::ContactInfo;
use streampanel::service::NoticeLevel;

#[tokio::test]
async fn missing_row_loads_as_empty_form_not_error() {
    let ctx = TestCore::new();
    let mut settings = ctx.core.contact_settings();

    settings.load().await.unwrap();
    assert_eq!(settings.contact_id(), None);
    assert_eq!(settings.whatsapp_number(), "");
}

#[tokio::test]
async fn saving_twice_results_in_exactly_one_row() {
    let mut ctx = TestCore::new();
    ctx.sign_in_admin().await;

    let mut settings = ctx.core.contact_settings();
    settings.load().await.unwrap();

    // First save inserts and re-reads to capture the assigned id
    settings.save("+1234567890").await;
    let first_id = settings.contact_id().expect("id captured").to_string();
    let notice = ctx.notices.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Contact info added");

    // Second save updates the same row
    settings.save("+1234567890").await;
    let notice = ctx.notices.recv().await.unwrap();
    assert_eq!(notice.message, "Contact info updated");

    let repo = ctx.core.repository::<ContactInfo>();
    assert_eq!(repo.count().await.unwrap(), 1);
    let row = repo.get(&first_id).await.unwrap().expect("same row");
    assert_eq!(row.whatsapp_number, "+1234567890");
}

#[tokio::test]
async fn existing_row_is_updated_in_place() {
    let mut ctx = TestCore::new();
    ctx.sign_in_admin().await;
    ctx.store
        .seed(
            "contact_info",
            serde_json::json!({"id": "contact-1", "whatsapp_number": "+111"}),
        )
        .await;

    let mut settings = ctx.core.contact_settings();
    settings.load().await.unwrap();
    assert_eq!(settings.contact_id(), Some("contact-1"));
    assert_eq!(settings.whatsapp_number(), "+111");

    settings.save("+222").await;
    ctx.notices.recv().await.unwrap();

    let repo = ctx.core.repository::<ContactInfo>();
    assert_eq!(repo.count().await.unwrap(), 1);
    assert_eq!(
        repo.get("contact-1").await.unwrap().unwrap().whatsapp_number,
        "+222"
    );
}
