//! Campaign Runner
//!
//! Explicit state for a send run: the phase machine and the campaign
//! cursor. Commands map 1:1 onto the operations here; the runner never
//! touches widgets, the opener or the scheduler.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::use_cases::message_builder::{MessageBuilder, RenderedMessage};
use crate::domain::campaign::{CampaignPhase, CampaignStatus};
use crate::domain::contact::{Contact, ContactBook};
use crate::domain::error::{AppError, Result};

/// One contact's send, handed to the command layer to open and report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendStep {
    pub index: usize,
    pub contact: Contact,
    pub message: RenderedMessage,
    pub status: CampaignStatus,
}

pub struct CampaignRunner {
    phase: CampaignPhase,
    cursor: usize,
    template: String,
    auto: bool,
}

impl Default for CampaignRunner {
    fn default() -> Self {
        Self {
            phase: CampaignPhase::Idle,
            cursor: 0,
            template: String::new(),
            auto: false,
        }
    }
}

impl CampaignRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CampaignPhase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Begin a new run from contact 0.
    ///
    /// Validates the inputs the way the UI expects: a non-empty template
    /// and a loaded contact book.
    pub fn start(
        &mut self,
        template: &str,
        auto: bool,
        book: &ContactBook,
        builder: &MessageBuilder,
    ) -> Result<SendStep> {
        if template.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Message template must not be empty".to_string(),
            ));
        }
        if book.is_empty() {
            return Err(AppError::ValidationError(
                "No contacts loaded".to_string(),
            ));
        }

        self.template = template.to_string();
        self.auto = auto;
        self.cursor = 0;
        self.phase = CampaignPhase::Running;

        info!(total = book.len(), auto, "Campaign started");
        self.current_step(book, builder)
    }

    /// The step for the contact under the cursor
    pub fn current_step(&self, book: &ContactBook, builder: &MessageBuilder) -> Result<SendStep> {
        if !self.phase.is_running() {
            return Err(AppError::ValidationError(
                "Campaign is not running".to_string(),
            ));
        }

        let contact = book.get(self.cursor).ok_or_else(|| {
            AppError::NotFound(format!("No contact at index {}", self.cursor))
        })?;

        let message = builder.build(&self.template, contact)?;

        Ok(SendStep {
            index: self.cursor,
            contact: contact.clone(),
            message,
            status: self.status(book.len()),
        })
    }

    /// Move the cursor forward; `None` means the run just finished
    pub fn advance(
        &mut self,
        book: &ContactBook,
        builder: &MessageBuilder,
    ) -> Result<Option<SendStep>> {
        if !self.phase.is_running() {
            return Err(AppError::ValidationError(
                "Campaign is not running".to_string(),
            ));
        }

        self.cursor += 1;

        if self.cursor >= book.len() {
            self.phase = CampaignPhase::Finished;
            info!(total = book.len(), "Campaign finished");
            return Ok(None);
        }

        self.current_step(book, builder).map(Some)
    }

    /// Stop without losing the cursor; `resume` picks up from the same
    /// contact, a later `start` resets it
    pub fn pause(&mut self) {
        if self.phase.is_running() {
            self.phase = CampaignPhase::Paused;
            info!(cursor = self.cursor, "Campaign paused");
        }
    }

    /// Continue a paused run from the contact under the cursor
    pub fn resume(&mut self, book: &ContactBook, builder: &MessageBuilder) -> Result<SendStep> {
        if self.phase != CampaignPhase::Paused {
            return Err(AppError::ValidationError(
                "Campaign is not paused".to_string(),
            ));
        }

        self.phase = CampaignPhase::Running;
        info!(cursor = self.cursor, "Campaign resumed");
        self.current_step(book, builder)
    }

    /// Drop back to Idle, e.g. when a new contact book replaces the old one
    pub fn reset(&mut self) {
        self.phase = CampaignPhase::Idle;
        self.cursor = 0;
        self.auto = false;
    }

    pub fn status(&self, total: usize) -> CampaignStatus {
        let progress_percent = match self.phase {
            CampaignPhase::Idle => 0.0,
            CampaignPhase::Finished => 100.0,
            _ if total == 0 => 0.0,
            // The contact under the cursor counts as in progress
            _ => ((self.cursor + 1).min(total) as f32 / total as f32) * 100.0,
        };

        CampaignStatus {
            phase: self.phase,
            cursor: self.cursor,
            total,
            progress_percent,
        }
    }
}
