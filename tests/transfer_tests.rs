//! Export/import tests for JSON and CSV
mod common;

use checklist_mcp::ChecklistServerHandler;
use common::{get_test_handler, open_new_category};
use pretty_assertions::assert_eq;

async fn populate(handler: &ChecklistServerHandler) {
    open_new_category(handler, "Math").await;
    handler.handle_add_item("Algebra".to_string()).await.unwrap();
    handler.handle_add_child(0, "Quiz1".to_string()).await.unwrap();
    handler.handle_toggle_stamp(0, Some(0)).await.unwrap();
    handler.handle_add_item("Geometry".to_string()).await.unwrap();
}

#[tokio::test]
async fn test_export_csv() {
    let (handler, _temp_file) = get_test_handler();
    populate(&handler).await;

    let csv = handler.handle_export("csv".to_string()).await.unwrap();
    assert_eq!(
        csv,
        "Category,Parent,Child,Done\nMath,Algebra,,1\nMath,Algebra,Quiz1,1\nMath,Geometry,,0\n"
    );
}

#[tokio::test]
async fn test_json_round_trip() {
    let (handler, _temp_file) = get_test_handler();
    populate(&handler).await;
    let exported = handler.handle_export("json".to_string()).await.unwrap();
    assert!(exported.contains("\"progress\": \"2/3\""));

    let (other, _other_file) = get_test_handler();
    other
        .handle_import("json".to_string(), exported.clone())
        .await
        .unwrap();
    assert_eq!(
        other.handle_export("json".to_string()).await.unwrap(),
        exported
    );
}

// 不正なJSONは既存データを変更しない
#[tokio::test]
async fn test_malformed_json_keeps_data() {
    let (handler, _temp_file) = get_test_handler();
    populate(&handler).await;
    let before = handler.handle_export("json".to_string()).await.unwrap();

    let result = handler
        .handle_import("json".to_string(), "[{\"id\":".to_string())
        .await;
    assert!(result.is_err());
    assert_eq!(
        handler.handle_export("json".to_string()).await.unwrap(),
        before
    );
}

#[tokio::test]
async fn test_import_csv_replaces_everything() {
    let (handler, _temp_file) = get_test_handler();
    populate(&handler).await;

    let csv = "Category,Parent,Child,Done\n\
               Science,Physics,,0\n\
               Science,Physics,Lab,1\n\
               ,Orphan,,1\n\
               Science,,Lost,1\n\
               \n\
               History,Rome,,1\n";
    let response = handler
        .handle_import("csv".to_string(), csv.to_string())
        .await
        .unwrap();
    assert!(response.starts_with("Imported 2 category(ies)"));

    let list = handler.handle_list_categories().await.unwrap();
    assert!(!list.contains("Math"));
    assert!(list.contains("0. Science"));
    assert!(list.contains("1/2 (50%)"));
    assert!(list.contains("1. History"));
    assert!(list.contains("1/1 (100%)"));

    // インポート後は開いているカテゴリがない
    assert_eq!(
        handler.handle_show_items().await.unwrap(),
        "No category is open"
    );
}

#[tokio::test]
async fn test_csv_export_then_import_keeps_tree() {
    let (handler, _temp_file) = get_test_handler();
    populate(&handler).await;
    let csv = handler.handle_export("csv".to_string()).await.unwrap();

    let (other, _other_file) = get_test_handler();
    other.handle_import("csv".to_string(), csv.clone()).await.unwrap();
    assert_eq!(other.handle_export("csv".to_string()).await.unwrap(), csv);
}

#[tokio::test]
async fn test_unknown_format_is_rejected() {
    let (handler, _temp_file) = get_test_handler();
    assert!(handler.handle_export("xml".to_string()).await.is_err());
    assert!(
        handler
            .handle_import("yaml".to_string(), String::new())
            .await
            .is_err()
    );
}
