//! Export and import of the whole collection

use crate::ChecklistServerHandler;
use crate::checklist::Command;
use crate::validation::{DataFormat, parse_format};
use mcp_attr::{Result as McpResult, bail_public};

impl ChecklistServerHandler {
    /// Serialize every category in the requested format
    pub async fn handle_export(&self, format: String) -> McpResult<String> {
        let format = parse_format(&format)?;
        let controller = self.controller.lock().unwrap();
        match format {
            DataFormat::Json => match controller.export_json() {
                Ok(text) => Ok(text),
                Err(e) => {
                    drop(controller);
                    bail_public!(_, "Failed to export JSON: {}", e);
                }
            },
            DataFormat::Csv => Ok(controller.export_csv()),
        }
    }

    /// Replace the whole collection with imported content
    pub async fn handle_import(&self, format: String, content: String) -> McpResult<String> {
        let command = match parse_format(&format)? {
            DataFormat::Json => Command::ImportJson { text: content },
            DataFormat::Csv => Command::ImportCsv { text: content },
        };
        let applied = self.execute(command)?;
        let count = self.read(|c| c.categories.len());
        Ok(applied.respond(format!("Imported {} category(ies)", count)))
    }
}
