//! Category, item and child workflow tests through the MCP handlers
mod common;

use common::{extract_id_from_response, get_test_handler, open_new_category};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_add_and_list_categories() {
    let (handler, _temp_file) = get_test_handler();

    let response = handler
        .handle_add_category("Math".to_string())
        .await
        .unwrap();
    assert!(response.contains("Category created with ID:"));
    let id = extract_id_from_response(&response);

    let list = handler.handle_list_categories().await.unwrap();
    assert!(list.contains("Found 1 category:"));
    assert!(list.contains(&format!("0. Math (id: {}) 0/0 (0%)", id)));
}

#[tokio::test]
async fn test_empty_list() {
    let (handler, _temp_file) = get_test_handler();
    assert_eq!(
        handler.handle_list_categories().await.unwrap(),
        "No categories yet"
    );
}

// 空の名前はキャンセル扱い
#[tokio::test]
async fn test_cancelled_prompts_change_nothing() {
    let (handler, _temp_file) = get_test_handler();
    assert_eq!(
        handler.handle_add_category(String::new()).await.unwrap(),
        "No changes made"
    );

    let id = open_new_category(&handler, "Math").await;
    assert_eq!(
        handler
            .handle_rename_category(id, String::new())
            .await
            .unwrap(),
        "No changes made"
    );
    assert!(handler.handle_list_categories().await.unwrap().contains("Math"));
}

#[tokio::test]
async fn test_move_category() {
    let (handler, _temp_file) = get_test_handler();
    handler.handle_add_category("A".to_string()).await.unwrap();
    handler.handle_add_category("B".to_string()).await.unwrap();

    // 先頭を上へ移動しても変化なし
    assert_eq!(
        handler
            .handle_move_category(0, "up".to_string())
            .await
            .unwrap(),
        "No changes made"
    );

    handler
        .handle_move_category(0, "down".to_string())
        .await
        .unwrap();
    let list = handler.handle_list_categories().await.unwrap();
    assert!(list.find("0. B").unwrap() < list.find("1. A").unwrap());

    assert!(
        handler
            .handle_move_category(0, "sideways".to_string())
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_move_category(5, "up".to_string())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_item_requires_open_category() {
    let (handler, _temp_file) = get_test_handler();
    handler.handle_add_category("Math".to_string()).await.unwrap();

    assert!(handler.handle_add_item("Algebra".to_string()).await.is_err());
    assert_eq!(
        handler.handle_show_items().await.unwrap(),
        "No category is open"
    );
}

#[tokio::test]
async fn test_item_lifecycle() {
    let (handler, _temp_file) = get_test_handler();
    open_new_category(&handler, "Math").await;

    handler.handle_add_item("Algebra".to_string()).await.unwrap();
    handler.handle_add_item("Geometry".to_string()).await.unwrap();
    handler
        .handle_move_item(1, "up".to_string())
        .await
        .unwrap();
    handler
        .handle_rename_item(0, "Shapes".to_string())
        .await
        .unwrap();

    let items = handler.handle_show_items().await.unwrap();
    assert_eq!(
        items,
        "Math (0/2)\n\n0. [ ] Shapes\n1. [ ] Algebra\n"
    );

    let response = handler.handle_delete_item(0, None).await.unwrap();
    assert!(response.contains("not confirmed"));
    handler.handle_delete_item(0, Some(true)).await.unwrap();
    assert_eq!(
        handler.handle_show_items().await.unwrap(),
        "Math (0/1)\n\n0. [ ] Algebra\n"
    );
}

// 子の完了状態が親に伝播する
#[tokio::test]
async fn test_child_stamps_propagate_to_parent() {
    let (handler, _temp_file) = get_test_handler();
    open_new_category(&handler, "Math").await;
    handler.handle_add_item("Algebra".to_string()).await.unwrap();
    handler
        .handle_add_child(0, "Quiz1".to_string())
        .await
        .unwrap();
    handler
        .handle_add_child(0, "Quiz2".to_string())
        .await
        .unwrap();

    handler.handle_toggle_stamp(0, Some(0)).await.unwrap();
    let items = handler.handle_show_items().await.unwrap();
    assert!(items.contains("0. < > Algebra"));
    assert!(items.starts_with("Math (1/3)"));

    let response = handler.handle_toggle_stamp(0, Some(1)).await.unwrap();
    assert!(response.contains("Sound: stamp_on"));
    let items = handler.handle_show_items().await.unwrap();
    assert!(items.contains("0. <x> Algebra"));
    assert!(items.starts_with("Math (3/3)"));

    let list = handler.handle_list_categories().await.unwrap();
    assert!(list.contains("3/3 (100%) [open]"));

    handler.handle_toggle_stamp(0, Some(0)).await.unwrap();
    let items = handler.handle_show_items().await.unwrap();
    assert!(items.contains("0. < > Algebra"));
    assert!(items.starts_with("Math (1/3)"));
}

#[tokio::test]
async fn test_child_operations() {
    let (handler, _temp_file) = get_test_handler();
    open_new_category(&handler, "Math").await;
    handler.handle_add_item("Algebra".to_string()).await.unwrap();
    handler.handle_add_child(0, "A".to_string()).await.unwrap();
    handler.handle_add_child(0, "B".to_string()).await.unwrap();

    handler
        .handle_move_child(0, 1, "up".to_string())
        .await
        .unwrap();
    handler
        .handle_rename_child(0, 0, "B2".to_string())
        .await
        .unwrap();
    let items = handler.handle_show_items().await.unwrap();
    assert!(items.contains("   0.0 [ ] B2\n   0.1 [ ] A\n"));

    assert!(
        handler
            .handle_delete_child(0, 0, None)
            .await
            .unwrap()
            .contains("not confirmed")
    );
    handler.handle_delete_child(0, 0, Some(true)).await.unwrap();
    assert!(!handler.handle_show_items().await.unwrap().contains("B2"));

    assert!(handler.handle_add_child(9, "x".to_string()).await.is_err());
    assert!(handler.handle_toggle_stamp(0, Some(9)).await.is_err());
}

#[tokio::test]
async fn test_collapse_hides_children() {
    let (handler, _temp_file) = get_test_handler();
    open_new_category(&handler, "Math").await;
    handler.handle_add_item("Algebra".to_string()).await.unwrap();
    handler.handle_add_child(0, "Quiz".to_string()).await.unwrap();

    let response = handler.handle_toggle_collapsed(0).await.unwrap();
    assert!(response.starts_with("Item 0 collapsed"));
    let items = handler.handle_show_items().await.unwrap();
    assert!(items.contains("(1 hidden)"));
    assert!(items.starts_with("Math (0/2)"));

    let response = handler.handle_toggle_collapsed(0).await.unwrap();
    assert!(response.starts_with("Item 0 expanded"));
}

#[tokio::test]
async fn test_close_and_delete_open_category() {
    let (handler, _temp_file) = get_test_handler();
    let id = open_new_category(&handler, "Math").await;

    handler.handle_close_category().await.unwrap();
    assert_eq!(
        handler.handle_show_items().await.unwrap(),
        "No category is open"
    );

    handler.handle_open_category(id.clone()).await.unwrap();
    handler
        .handle_delete_category(id, Some(true))
        .await
        .unwrap();
    assert_eq!(
        handler.handle_show_items().await.unwrap(),
        "No category is open"
    );
    assert!(handler.handle_add_item("x".to_string()).await.is_err());
}
