//! Preview core: pure per-field preview state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use model::{ExtractionError, PreviewRecord, PreviewRequest};
pub use msg::Msg;
pub use state::{AppState, CoreConfig, FieldId, Generation, PreviewState, DEBOUNCE_DELAY};
pub use update::update;
pub use validate::{UrlRejection, ValidatedUrl};
pub use view_model::{AppViewModel, FieldView};
