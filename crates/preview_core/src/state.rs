use std::collections::BTreeMap;
use std::time::Duration;

use crate::view_model::{AppViewModel, FieldView};
use crate::{ExtractionError, PreviewRecord, PreviewRequest, UrlRejection, ValidatedUrl};

pub type FieldId = u64;
pub type Generation = u64;

/// Quiet period the input must hold before a fetch is issued.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// No input, or input that is not a URL.
    #[default]
    Idle,
    /// Debounce timer running or fetch in flight.
    Pending,
    Resolved(PreviewRecord),
    Failed(String),
}

impl PreviewState {
    pub fn is_pending(&self) -> bool {
        matches!(self, PreviewState::Pending)
    }

    pub fn record(&self) -> Option<&PreviewRecord> {
        match self {
            PreviewState::Resolved(record) => Some(record),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub debounce: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Awaiting {
    #[default]
    Nothing,
    Debounce(ValidatedUrl),
    Fetch,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FieldState {
    input: String,
    generation: Generation,
    preview: PreviewState,
    awaiting: Awaiting,
    rejection: Option<UrlRejection>,
}

impl FieldState {
    /// Opens a new episode for `text`; every earlier generation becomes stale.
    pub(crate) fn restart(&mut self, text: String) -> Generation {
        self.generation += 1;
        self.input = text;
        self.generation
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn has_pending_work(&self) -> bool {
        self.awaiting != Awaiting::Nothing
    }

    pub(crate) fn go_idle(&mut self, rejection: UrlRejection) {
        self.preview = PreviewState::Idle;
        self.awaiting = Awaiting::Nothing;
        // An empty box is not an error worth showing.
        self.rejection = (rejection != UrlRejection::Empty).then_some(rejection);
    }

    pub(crate) fn start_debounce(&mut self, url: ValidatedUrl) {
        self.preview = PreviewState::Pending;
        self.awaiting = Awaiting::Debounce(url);
        self.rejection = None;
    }

    /// Moves a debouncing episode to fetching. Returns `None` for stale or repeated timers.
    pub(crate) fn take_debounced(&mut self, generation: Generation) -> Option<PreviewRequest> {
        if generation != self.generation {
            return None;
        }
        match std::mem::take(&mut self.awaiting) {
            Awaiting::Debounce(url) => {
                self.awaiting = Awaiting::Fetch;
                Some(PreviewRequest { url })
            }
            other => {
                self.awaiting = other;
                None
            }
        }
    }

    /// Applies a fetch result if it belongs to the current episode.
    pub(crate) fn settle(
        &mut self,
        generation: Generation,
        result: Result<PreviewRecord, ExtractionError>,
    ) -> bool {
        if generation != self.generation || self.awaiting != Awaiting::Fetch {
            return false;
        }
        self.awaiting = Awaiting::Nothing;
        self.preview = match result {
            Ok(record) => PreviewState::Resolved(record),
            Err(err) => PreviewState::Failed(err.to_string()),
        };
        true
    }

    fn view(&self, field: FieldId) -> FieldView {
        FieldView {
            field,
            input: self.input.clone(),
            generation: self.generation,
            preview: self.preview.clone(),
            input_error: self.rejection.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    config: CoreConfig,
    fields: BTreeMap<FieldId, FieldState>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            fields: self
                .fields
                .iter()
                .map(|(id, field)| field.view(*id))
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Current preview for a field; unknown fields are idle.
    pub fn preview(&self, field: FieldId) -> PreviewState {
        self.fields
            .get(&field)
            .map(|f| f.preview.clone())
            .unwrap_or_default()
    }

    pub fn current_generation(&self, field: FieldId) -> Option<Generation> {
        self.fields.get(&field).map(|f| f.generation)
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn debounce(&self) -> Duration {
        self.config.debounce
    }

    pub(crate) fn field_entry(&mut self, field: FieldId) -> &mut FieldState {
        self.fields.entry(field).or_default()
    }

    pub(crate) fn field_mut(&mut self, field: FieldId) -> Option<&mut FieldState> {
        self.fields.get_mut(&field)
    }

    pub(crate) fn remove_field(&mut self, field: FieldId) -> bool {
        self.fields.remove(&field).is_some()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
