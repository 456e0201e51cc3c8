use crate::{FieldId, Generation, PreviewState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub fields: Vec<FieldView>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn field(&self, field: FieldId) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: FieldId,
    pub input: String,
    pub generation: Generation,
    pub preview: PreviewState,
    /// Why the input is not being previewed, if it was rejected.
    pub input_error: Option<String>,
}
