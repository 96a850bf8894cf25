//! Parameter validation for MCP tools
//!
//! Turns raw tool arguments (ids, directions, format names) into typed values
//! and reports bad input as `INVALID_PARAMS` with a readable message.

use crate::checklist::{CategoryId, Checklist, Direction};
use mcp_attr::Result as McpResult;
use std::str::FromStr;

/// Export/import format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Csv,
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "csv" => Ok(DataFormat::Csv),
            _ => Err(format!(
                "Invalid format '{}'. Valid options are: json, csv",
                s
            )),
        }
    }
}

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

pub fn parse_direction(direction: &str) -> McpResult<Direction> {
    direction.parse::<Direction>().map_err(invalid_params)
}

pub fn parse_format(format: &str) -> McpResult<DataFormat> {
    format.parse::<DataFormat>().map_err(invalid_params)
}

/// Find the stored id matching what the client typed
///
/// The error lists the available categories so the client can retry.
pub fn resolve_category_id(checklist: &Checklist, key: &str) -> McpResult<CategoryId> {
    checklist
        .resolve_id(key)
        .ok_or_else(|| invalid_params(format_unknown_category_error(key, checklist)))
}

pub fn format_unknown_category_error(key: &str, checklist: &Checklist) -> String {
    if checklist.categories.is_empty() {
        format!(
            "Category '{}' does not exist. No categories have been created yet. Create one first using add_category().",
            key
        )
    } else {
        let available: Vec<String> = checklist
            .categories
            .iter()
            .map(|c| format!("{} ({})", c.id, c.name))
            .collect();
        format!(
            "Category '{}' does not exist.\nAvailable categories: {}",
            key,
            available.join(", ")
        )
    }
}

/// Delete confirmations default to "no"
pub fn confirmed(confirm: Option<bool>) -> bool {
    confirm.unwrap_or(false)
}
