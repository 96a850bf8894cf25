//! MCP tool handlers for the checklist server
//!
//! Each file groups the tools for one level of the tree. Handlers translate
//! tool arguments into a `Command`, run it through the controller and build
//! the text response.

pub mod category;
pub mod child;
pub mod item;
pub mod transfer;
