//! Common test utilities for integration tests

#![allow(dead_code)]

use checklist_mcp::ChecklistServerHandler;
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (ChecklistServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = ChecklistServerHandler::new(temp_file.path(), false).unwrap();
    (handler, temp_file)
}

/// Extract category ID from add_category() response message
/// Response format: "Category created with ID: <id>\n\n..."
pub fn extract_id_from_response(response: &str) -> String {
    let start = response.find("ID: ").expect("response carries an id") + 4;
    response[start..]
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Add a category, open it and return its id
pub async fn open_new_category(handler: &ChecklistServerHandler, name: &str) -> String {
    let response = handler
        .handle_add_category(name.to_string())
        .await
        .unwrap();
    let id = extract_id_from_response(&response);
    handler.handle_open_category(id.clone()).await.unwrap();
    id
}
