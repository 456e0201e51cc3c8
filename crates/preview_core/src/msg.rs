use crate::{ExtractionError, FieldId, Generation, PreviewRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged { field: FieldId, text: String },
    /// Debounce timer started for `generation` ran to completion.
    DebounceElapsed {
        field: FieldId,
        generation: Generation,
    },
    /// Extractor finished for the fetch issued under `generation`.
    FetchSettled {
        field: FieldId,
        generation: Generation,
        result: Result<PreviewRecord, ExtractionError>,
    },
    /// Input field went away; forget its state.
    FieldClosed { field: FieldId },
}
