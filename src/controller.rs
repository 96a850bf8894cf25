//! Single owner of the checklist state
//!
//! `Controller::dispatch` runs one command to completion: apply it to the
//! in-memory state, recompute progress, write the collection back, then ask
//! the notifier to redraw.

use thiserror::Error;

use crate::checklist::{ChecklistError, Checklist, Command, Outcome, csv, json};
use crate::notifier::{EventLog, Notifier};
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Checklist(#[from] ChecklistError),

    #[error("Failed to save: {0:#}")]
    Persist(anyhow::Error),
}

pub struct Controller<N: Notifier = EventLog> {
    checklist: Checklist,
    storage: Storage,
    notifier: N,
}

impl<N: Notifier> Controller<N> {
    /// Load the stored collection and take ownership of it
    pub fn open(storage: Storage, notifier: N) -> anyhow::Result<Self> {
        let categories = storage.load()?;
        tracing::info!(categories = categories.len(), "Checklist loaded");
        Ok(Self {
            checklist: Checklist::from_categories(categories),
            storage,
            notifier,
        })
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, ControllerError> {
        let outcome = match self.checklist.apply(&command) {
            Ok(outcome) => outcome,
            Err(ChecklistError::MalformedImport(e)) => {
                tracing::error!(error = %e, "JSON import failed, existing data kept");
                return Err(ChecklistError::MalformedImport(e).into());
            }
            Err(e) => return Err(e.into()),
        };

        if outcome.is_unchanged() {
            tracing::debug!(command = %command.describe(), "No changes");
            return Ok(outcome);
        }

        self.checklist.refresh_progress();

        if let Outcome::Stamped(stamped) = outcome {
            self.notifier.stamp_cue(stamped);
        }

        if outcome.needs_persist() {
            let message = command.describe();
            self.storage
                .save(&self.checklist.categories, &message)
                .map_err(ControllerError::Persist)?;
            tracing::info!(commit_message = %message, "Saved checklist");
        }

        let scope = command.refresh_scope();
        if scope.items() {
            self.notifier.refresh_items();
        }
        if scope.categories() {
            self.notifier.refresh_categories();
        }

        Ok(outcome)
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        json::export_json(&self.checklist.categories)
    }

    pub fn export_csv(&self) -> String {
        csv::export_csv(&self.checklist.categories)
    }

    pub fn shutdown(&self) -> anyhow::Result<()> {
        self.storage.shutdown()
    }
}
