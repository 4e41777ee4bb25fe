//! State of the memo detail dialog.
//!
//! The summary and the in-flight flag belong to the displayed memo. They are
//! cleared whenever a different memo is shown or the dialog closes, and a
//! summary that arrives for a memo that is no longer displayed is dropped.

use std::fmt;

use memo_core::error::{MemoError, MemoResult};
use memo_core::types::Memo;
use memo_core::Locale;

use crate::client::MemoClient;

/// How the dialog was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// Escape key.
    Escape,
    /// Click outside the dialog.
    Backdrop,
    /// The dialog's close button.
    Button,
}

/// Message to show the user in a blocking alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Callbacks owned by whoever hosts the dialog.
pub trait DetailController {
    /// The dialog closed.
    fn on_close(&mut self);
    /// The user asked to edit `memo`.
    fn on_edit(&mut self, memo: &Memo);
    /// The user confirmed deletion of the memo with this id.
    fn on_delete(&mut self, id: &str);
}

/// Detail dialog for a single memo.
pub struct MemoDetailView<C: DetailController> {
    controller: C,
    locale: Locale,
    memo: Option<Memo>,
    summary: Option<String>,
    summarizing: bool,
}

impl<C: DetailController> MemoDetailView<C> {
    pub fn new(controller: C, locale: Locale) -> Self {
        Self {
            controller,
            locale,
            memo: None,
            summary: None,
            summarizing: false,
        }
    }

    /// Display `memo`, or close silently with `None`.
    ///
    /// Showing a memo with a different id, or opening a closed dialog,
    /// starts from a clean state. Re-showing the memo that is already open
    /// (for example after it was refreshed) keeps the current summary.
    pub fn show(&mut self, memo: Option<Memo>) {
        let same_memo = matches!(
            (&self.memo, &memo),
            (Some(current), Some(next)) if current.id == next.id
        );
        if !same_memo {
            self.summary = None;
            self.summarizing = false;
        }
        self.memo = memo;
    }

    /// Close the dialog and notify the controller. No-op when already closed.
    pub fn close(&mut self, trigger: CloseTrigger) {
        if self.memo.is_none() {
            return;
        }
        tracing::debug!(?trigger, "Closing memo detail");
        self.dismiss();
    }

    fn dismiss(&mut self) {
        self.memo = None;
        self.summary = None;
        self.summarizing = false;
        self.controller.on_close();
    }

    pub fn is_open(&self) -> bool {
        self.memo.is_some()
    }

    pub fn memo(&self) -> Option<&Memo> {
        self.memo.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn is_summarizing(&self) -> bool {
        self.summarizing
    }

    /// Localized label of the displayed memo's category.
    pub fn category_label(&self) -> Option<&'static str> {
        self.memo
            .as_ref()
            .map(|m| self.locale.category_label(m.category))
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Whether the summarize action is available.
    pub fn can_summarize(&self) -> bool {
        matches!(&self.memo, Some(m) if !m.content.is_empty())
            && self.summary.is_none()
            && !self.summarizing
    }

    /// Mark a summary request as in flight and return the content to send.
    ///
    /// Returns `None` when the action is unavailable.
    pub fn begin_summarize(&mut self) -> Option<String> {
        if !self.can_summarize() {
            return None;
        }
        self.summarizing = true;
        self.memo.as_ref().map(|m| m.content.clone())
    }

    /// Apply the outcome of a summary request for `memo_id`.
    ///
    /// Results for a memo that is no longer displayed are discarded. A
    /// failure clears the in-flight flag and yields an alert for the user:
    /// the server's error string when it sent one, a generic message for
    /// anything else (no connection, unreadable response).
    pub fn finish_summarize(&mut self, memo_id: &str, result: MemoResult<String>) -> Option<Alert> {
        let current = self.memo.as_ref().map(|m| m.id.as_str());
        if current != Some(memo_id) || !self.summarizing {
            tracing::debug!(memo_id, "Dropping summary for a memo that is no longer shown");
            return None;
        }

        self.summarizing = false;
        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                None
            }
            Err(MemoError::Api { status, message }) if status != 0 => {
                tracing::warn!(memo_id, status, reason = %message, "Summary request failed");
                Some(Alert {
                    message: self.locale.summary_failed_alert(&message),
                })
            }
            Err(err) => {
                tracing::warn!(memo_id, error = %err, "Summary request did not complete");
                Some(Alert {
                    message: self.locale.summary_error_alert().to_string(),
                })
            }
        }
    }

    /// Request a summary of the displayed memo.
    pub async fn summarize(&mut self, client: &MemoClient) -> Option<Alert> {
        let content = self.begin_summarize()?;
        let memo_id = self.memo.as_ref()?.id.clone();
        let result = client.summarize(&content).await;
        self.finish_summarize(&memo_id, result)
    }

    /// Hand the displayed memo to the editor and close.
    pub fn edit(&mut self) {
        if let Some(memo) = self.memo.clone() {
            self.controller.on_edit(&memo);
            self.dismiss();
        }
    }

    /// Delete the displayed memo once the user has confirmed, then close.
    ///
    /// Returns whether the delete was requested.
    pub fn delete(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        match self.memo.as_ref().map(|m| m.id.clone()) {
            Some(id) => {
                self.controller.on_delete(&id);
                self.dismiss();
                true
            }
            None => false,
        }
    }
}
