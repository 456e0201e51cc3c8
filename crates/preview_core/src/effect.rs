use std::time::Duration;

use crate::{FieldId, Generation, PreviewRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the field's debounce timer. Replaces any timer or fetch still running for the field.
    ScheduleDebounce {
        field: FieldId,
        generation: Generation,
        delay: Duration,
    },
    /// Run the extractor for a settled input.
    FetchPreview {
        field: FieldId,
        generation: Generation,
        request: PreviewRequest,
    },
    /// Drop whatever timer or fetch is still running for the field.
    CancelPending { field: FieldId },
}
