//! Form dialog state machine
//!
//! The ephemeral edit state layered over a repository:
//! `Closed -> OpenCreate -> Submitting -> Closed` and
//! `Closed -> OpenEdit -> Submitting -> Closed`. Opening for edit
//! snapshots the target's fields into the draft; opening for create
//! resets to the default draft. Cancel discards unconditionally.
//! Exactly one dialog exists per page.

use crate::data::Draft;

/// Where the dialog currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    OpenCreate,
    OpenEdit,
    Submitting,
}

/// The draft and target captured at submit time.
#[derive(Debug, Clone)]
pub struct Submission<D> {
    pub draft: D,
    /// Target id when editing; `None` when creating
    pub editing: Option<String>,
}

/// Dialog controller generic over the entity's draft type.
#[derive(Debug, Clone)]
pub struct FormDialog<D: Draft> {
    state: DialogState,
    draft: D,
    editing: Option<String>,
}

impl<D: Draft> FormDialog<D> {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            draft: D::default(),
            editing: None,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::OpenCreate | DialogState::OpenEdit)
    }

    /// Target id of an open edit dialog.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutable draft access for form bindings.
    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Open for create: the draft always resets to defaults, never a
    /// carry-over from a previous edit.
    pub fn open_create(&mut self) {
        self.draft = D::default();
        self.editing = None;
        self.state = DialogState::OpenCreate;
    }

    /// Open for edit with a snapshot of the entity's current fields.
    pub fn open_edit(&mut self, id: impl Into<String>, snapshot: D) {
        self.draft = snapshot;
        self.editing = Some(id.into());
        self.state = DialogState::OpenEdit;
    }

    /// Discard the draft and close. No-op while a submit is in flight;
    /// an in-flight mutation cannot be aborted.
    pub fn cancel(&mut self) {
        if self.is_open() {
            self.reset();
        }
    }

    /// Move to `Submitting` and hand back what to submit.
    ///
    /// Returns `None` unless the dialog is open, making a stray submit
    /// a no-op.
    pub fn begin_submit(&mut self) -> Option<Submission<D>> {
        if !self.is_open() {
            return None;
        }
        self.state = DialogState::Submitting;
        Some(Submission {
            draft: self.draft.clone(),
            editing: self.editing.clone(),
        })
    }

    /// Exit `Submitting` back to `Closed`, on success and failure
    /// alike. Failure feedback travels on the notice channel, not by
    /// reopening the dialog.
    pub fn finish_submit(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = D::default();
        self.editing = None;
        self.state = DialogState::Closed;
    }
}

impl<D: Draft> Default for FormDialog<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CategoryDraft;

    #[test]
    fn create_after_edit_resets_draft() {
        let mut dialog = FormDialog::<CategoryDraft>::new();

        dialog.open_edit(
            "cat-1",
            CategoryDraft {
                name: "Action".to_string(),
                slug: "action".to_string(),
            },
        );
        assert_eq!(dialog.state(), DialogState::OpenEdit);
        assert_eq!(dialog.editing(), Some("cat-1"));

        dialog.open_create();
        assert_eq!(dialog.state(), DialogState::OpenCreate);
        assert_eq!(dialog.editing(), None);
        assert_eq!(*dialog.draft(), CategoryDraft::default());
    }

    #[test]
    fn cancel_discards_unconditionally() {
        let mut dialog = FormDialog::<CategoryDraft>::new();
        dialog.open_create();
        dialog.draft_mut().name = "Half-typed".to_string();

        dialog.cancel();
        assert_eq!(dialog.state(), DialogState::Closed);
        assert_eq!(*dialog.draft(), CategoryDraft::default());
    }

    #[test]
    fn submit_only_from_open_states() {
        let mut dialog = FormDialog::<CategoryDraft>::new();
        assert!(dialog.begin_submit().is_none());

        dialog.open_create();
        dialog.draft_mut().name = "Drama".to_string();
        let submission = dialog.begin_submit().expect("open dialog submits");
        assert_eq!(submission.editing, None);
        assert_eq!(submission.draft.name, "Drama");
        assert_eq!(dialog.state(), DialogState::Submitting);

        // Submitting cannot be cancelled
        dialog.cancel();
        assert_eq!(dialog.state(), DialogState::Submitting);

        dialog.finish_submit();
        assert_eq!(dialog.state(), DialogState::Closed);
    }
}
