//! Editing session for one spread slug.

use std::collections::VecDeque;
use std::sync::Arc;

use spreadkit_core::{
    event_bus, AppEvent, EventBus, LayoutError, LayoutEvent, Locale, PersistenceEvent,
    SelectionEvent, SpreadPayload, SpreadRecord, SpreadStore, LOCALES,
};

use super::draft::LocaleDraft;
use super::{DeleteError, EditorOptions, SaveError, SaveOutcome};
use crate::canvas::{
    apply_effects, CanvasController, CanvasEffect, CanvasInput, DragState, MoveCoalescer,
};
use crate::positions::{self, duplicate_indices, PositionField};
use crate::sync::{sync_layout, SyncReport};

#[derive(Debug, Clone)]
struct Snapshot {
    en: LocaleDraft,
    zh: LocaleDraft,
}

/// Form state for editing both locale variants of a spread.
///
/// Holds the two drafts, the active tab, the layout canvas of the active
/// tab and an undo history of draft snapshots.
pub struct SpreadEditor {
    pub slug: String,
    pub recommended: bool,
    en: LocaleDraft,
    zh: LocaleDraft,
    active: Locale,
    canvas: CanvasController,
    coalescer: MoveCoalescer,
    options: EditorOptions,
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    drag_recorded: bool,
    bus: Arc<EventBus>,
}

impl SpreadEditor {
    /// Starts an empty session for a new slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self::with_options(slug, EditorOptions::default())
    }

    /// Starts an empty session with explicit options.
    pub fn with_options(slug: impl Into<String>, options: EditorOptions) -> Self {
        Self {
            slug: slug.into(),
            recommended: false,
            en: LocaleDraft::default(),
            zh: LocaleDraft::default(),
            active: options.default_locale,
            canvas: CanvasController::new(),
            coalescer: MoveCoalescer::new(),
            options,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            drag_recorded: false,
            bus: event_bus(),
        }
    }

    /// Seeds a session from the persisted locale rows of one slug.
    ///
    /// Slug and `recommended` come from the `en` row, else `zh`, else the
    /// first row given.
    pub fn open(records: &[SpreadRecord], options: EditorOptions) -> Self {
        let primary = records
            .iter()
            .find(|r| r.locale == Locale::En)
            .or_else(|| records.iter().find(|r| r.locale == Locale::Zh))
            .or_else(|| records.first());

        let mut editor = Self::with_options(
            primary.map(|r| r.slug.clone()).unwrap_or_default(),
            options,
        );
        editor.recommended = primary.map(|r| r.recommended).unwrap_or(false);
        for record in records {
            *editor.draft_mut(record.locale) = LocaleDraft::from_record(record);
        }
        tracing::debug!(slug = %editor.slug, rows = records.len(), "opened spread");
        editor
    }

    /// Routes notifications to `bus` instead of the global bus.
    pub fn with_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = bus;
        self
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn draft(&self, locale: Locale) -> &LocaleDraft {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => &self.zh,
        }
    }

    fn draft_mut(&mut self, locale: Locale) -> &mut LocaleDraft {
        match locale {
            Locale::En => &mut self.en,
            Locale::Zh => &mut self.zh,
        }
    }

    /// Locale whose positions the canvas shows.
    pub fn active(&self) -> Locale {
        self.active
    }

    /// Switches tabs. Any selection on the old tab is dropped.
    ///
    /// Returns the canvas effects of dropping it, which include
    /// `DetachPointerListeners` when a drag was in flight.
    pub fn set_active(&mut self, locale: Locale) -> Vec<CanvasEffect> {
        if locale == self.active {
            return Vec::new();
        }
        let mut effects = self.flush_frame();
        effects.extend(self.canvas_input(CanvasInput::ClearSelection));
        self.active = locale;
        effects
    }

    pub fn canvas_state(&self) -> DragState {
        self.canvas.state()
    }

    /// Whether pointer move/release listeners should be attached.
    pub fn is_listening(&self) -> bool {
        self.canvas.is_listening()
    }

    /// Edits text fields of one draft as a single undo step.
    pub fn edit_draft(&mut self, locale: Locale, edit: impl FnOnce(&mut LocaleDraft)) {
        self.record();
        edit(self.draft_mut(locale));
    }

    /// Appends a blank slot to a locale and returns its slot number.
    pub fn add_position(&mut self, locale: Locale) -> usize {
        self.record();
        let draft = self.draft_mut(locale);
        draft.positions = positions::add_position(&draft.positions);
        let slot = draft.positions.len() - 1;
        tracing::debug!(%locale, slot, "position added");
        self.emit(AppEvent::Layout(LayoutEvent::PositionAdded { locale, slot }));
        slot
    }

    /// Removes a slot from a locale and returns the canvas effects of the
    /// removal on the active tab.
    pub fn remove_position(
        &mut self,
        locale: Locale,
        slot: usize,
    ) -> Result<Vec<CanvasEffect>, LayoutError> {
        let next = positions::remove_position(&self.draft(locale).positions, slot)?;
        self.record();
        self.draft_mut(locale).positions = next;
        let effects = if locale == self.active {
            self.canvas_input(CanvasInput::SlotRemoved { slot })
        } else {
            Vec::new()
        };
        tracing::debug!(%locale, slot, "position removed");
        self.emit(AppEvent::Layout(LayoutEvent::PositionRemoved { locale, slot }));
        Ok(effects)
    }

    /// Replaces one attribute of a slot.
    pub fn update_position(
        &mut self,
        locale: Locale,
        slot: usize,
        field: PositionField,
    ) -> Result<(), LayoutError> {
        let relabel = matches!(field, PositionField::Index(_));
        let next = positions::update_field(&self.draft(locale).positions, slot, field)?;
        self.record();
        self.draft_mut(locale).positions = next;
        if relabel {
            let dupes = duplicate_indices(&self.draft(locale).positions);
            if !dupes.is_empty() {
                tracing::warn!(%locale, labels = ?dupes, "duplicate index labels");
            }
        }
        Ok(())
    }

    /// Applies one canvas input to the active locale.
    ///
    /// With move coalescing on, moves are held until [`flush_frame`]
    /// (or the next non-move input) and only the latest one is applied.
    ///
    /// [`flush_frame`]: SpreadEditor::flush_frame
    pub fn handle_canvas_input(&mut self, input: CanvasInput) -> Vec<CanvasEffect> {
        if !self.options.coalesce_moves {
            return self.canvas_input(input);
        }
        match self.coalescer.push(input) {
            None => Vec::new(),
            Some(other) => {
                let mut effects = self.flush_frame();
                effects.extend(self.canvas_input(other));
                effects
            }
        }
    }

    /// Applies the pending coalesced move, if any.
    pub fn flush_frame(&mut self) -> Vec<CanvasEffect> {
        match self.coalescer.flush() {
            Some(pending) => self.canvas_input(pending),
            None => Vec::new(),
        }
    }

    fn canvas_input(&mut self, input: CanvasInput) -> Vec<CanvasEffect> {
        let locale = self.active;
        let count = self.draft(locale).positions.len();
        let effects = self.canvas.handle(input, count);

        // every press, including one that re-targets a drag, starts a new step
        if effects.iter().any(|e| matches!(e, CanvasEffect::Selected(_))) {
            self.drag_recorded = false;
        }
        let moves = effects
            .iter()
            .any(|e| matches!(e, CanvasEffect::PositionChanged { .. }));
        if moves && !self.drag_recorded {
            // one undo step per drag
            self.record();
            self.drag_recorded = true;
        }

        match apply_effects(&self.draft(locale).positions, &effects) {
            Ok(next) => self.draft_mut(locale).positions = next,
            Err(e) => tracing::warn!(%locale, error = %e, "dropped canvas write"),
        }

        for effect in &effects {
            match *effect {
                CanvasEffect::Selected(slot) => {
                    self.emit(AppEvent::Selection(SelectionEvent::SlotSelected { locale, slot }))
                }
                CanvasEffect::SelectionCleared => {
                    self.emit(AppEvent::Selection(SelectionEvent::Cleared { locale }))
                }
                CanvasEffect::PositionChanged { slot, x, y } => {
                    self.emit(AppEvent::Layout(LayoutEvent::PositionMoved { locale, slot, x, y }))
                }
                CanvasEffect::AttachPointerListeners | CanvasEffect::DetachPointerListeners => {}
            }
        }
        effects
    }

    /// Copies the active locale's geometry onto the other locale.
    pub fn sync_layout(&mut self) -> SyncReport {
        let from = self.active;
        let to = from.other();
        self.record();

        let source = &self.draft(from).positions;
        let target = &self.draft(to).positions;
        let report = SyncReport {
            from,
            to,
            source_len: source.len(),
            target_len: target.len(),
        };
        let synced = sync_layout(source, target);
        self.draft_mut(to).positions = synced;

        tracing::info!(
            %from,
            %to,
            truncated = report.truncated(),
            extended = report.extended(),
            "layout synced"
        );
        self.emit(AppEvent::Layout(LayoutEvent::Synced {
            from,
            to,
            count: report.source_len,
        }));
        self.emit(AppEvent::info(report.message()));
        report
    }

    fn record(&mut self) {
        self.undo_stack.push_back(Snapshot {
            en: self.en.clone(),
            zh: self.zh.clone(),
        });
        self.redo_stack.clear();
        while self.undo_stack.len() > self.options.history_limit {
            self.undo_stack.pop_front();
        }
    }

    fn restore(&mut self, snapshot: Snapshot) -> (Snapshot, Vec<CanvasEffect>) {
        // slots may have vanished; a held move belongs to the replaced list
        self.coalescer.flush();
        let effects = self.canvas_input(CanvasInput::ClearSelection);
        let current = Snapshot {
            en: std::mem::replace(&mut self.en, snapshot.en),
            zh: std::mem::replace(&mut self.zh, snapshot.zh),
        };
        (current, effects)
    }

    /// Reverts the last edit.
    ///
    /// Returns `None` when there is nothing to undo, else the canvas effects
    /// of dropping the selection.
    pub fn undo(&mut self) -> Option<Vec<CanvasEffect>> {
        let snapshot = self.undo_stack.pop_back()?;
        let (current, effects) = self.restore(snapshot);
        self.redo_stack.push(current);
        Some(effects)
    }

    /// Re-applies the last undone edit.
    pub fn redo(&mut self) -> Option<Vec<CanvasEffect>> {
        let snapshot = self.redo_stack.pop()?;
        let (current, effects) = self.restore(snapshot);
        self.undo_stack.push_back(current);
        Some(effects)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Payloads of the locales that would be saved, `en` first.
    pub fn payloads(&self) -> Vec<SpreadPayload> {
        LOCALES
            .iter()
            .filter(|l| self.draft(**l).is_saveable())
            .map(|l| self.draft(*l).to_payload(&self.slug, *l, self.recommended))
            .collect()
    }

    /// Persists both locales, `en` then `zh`.
    ///
    /// A locale with an empty name is skipped. Each remaining locale is
    /// replaced when it has a row id and created otherwise. The first
    /// rejection stops the save; locales saved before it stay saved.
    pub async fn save(&mut self, store: &dyn SpreadStore) -> Result<SaveOutcome, SaveError> {
        let mut outcome = SaveOutcome::default();
        for locale in LOCALES {
            let draft = self.draft(locale);
            if !draft.is_saveable() {
                tracing::debug!(%locale, "skipping locale without name");
                outcome.skipped.push(locale);
                self.emit(AppEvent::Persistence(PersistenceEvent::Skipped { locale }));
                continue;
            }
            let record_id = draft.record_id;
            let payload = draft.to_payload(&self.slug, locale, self.recommended);

            let result = match record_id {
                Some(id) => store.replace(id, payload).await.map(|_| id),
                None => store.create(payload).await.map(|record| record.id),
            };

            match result {
                Ok(id) => {
                    tracing::info!(slug = %self.slug, %locale, %id, "locale saved");
                    self.draft_mut(locale).record_id = Some(id);
                    outcome.saved.push((locale, id));
                    self.emit(AppEvent::Persistence(PersistenceEvent::Saved { locale, id }));
                }
                Err(source) => {
                    tracing::error!(slug = %self.slug, %locale, error = %source, "save failed");
                    self.emit(AppEvent::Persistence(PersistenceEvent::SaveFailed {
                        locale,
                        reason: source.to_string(),
                    }));
                    self.emit(AppEvent::error(format!(
                        "Failed to save {}: {}",
                        locale.label(),
                        source
                    )));
                    return Err(SaveError {
                        locale,
                        saved: outcome.saved,
                        source,
                    });
                }
            }
        }
        if !outcome.saved.is_empty() {
            self.emit(AppEvent::info("Spread saved"));
        }
        Ok(outcome)
    }

    /// Deletes the persisted rows of both locales, `en` then `zh`.
    ///
    /// Not reversible. On failure, rows deleted before it stay deleted.
    pub async fn delete_all(&mut self, store: &dyn SpreadStore) -> Result<Vec<Locale>, DeleteError> {
        let mut deleted = Vec::new();
        for locale in LOCALES {
            let Some(id) = self.draft(locale).record_id else {
                continue;
            };
            match store.delete(id).await {
                Ok(()) => {
                    tracing::info!(slug = %self.slug, %locale, %id, "locale deleted");
                    self.draft_mut(locale).record_id = None;
                    deleted.push(locale);
                    self.emit(AppEvent::Persistence(PersistenceEvent::Deleted { locale, id }));
                }
                Err(source) => {
                    tracing::error!(slug = %self.slug, %locale, error = %source, "delete failed");
                    self.emit(AppEvent::Persistence(PersistenceEvent::DeleteFailed {
                        locale,
                        reason: source.to_string(),
                    }));
                    self.emit(AppEvent::error(format!(
                        "Failed to delete {}: {}",
                        locale.label(),
                        source
                    )));
                    return Err(DeleteError {
                        locale,
                        deleted,
                        source,
                    });
                }
            }
        }
        Ok(deleted)
    }

    fn emit(&self, event: AppEvent) {
        if let Err(e) = self.bus.publish(event) {
            tracing::trace!(error = %e, "event not delivered");
        }
    }
}
