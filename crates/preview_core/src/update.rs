use crate::{AppState, Effect, Msg, ValidatedUrl};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged { field, text } => {
            let delay = state.debounce();
            let entry = state.field_entry(field);
            let had_pending_work = entry.has_pending_work();
            let generation = entry.restart(text);
            let effects = match ValidatedUrl::parse(entry.input()) {
                Ok(url) => {
                    entry.start_debounce(url);
                    vec![Effect::ScheduleDebounce {
                        field,
                        generation,
                        delay,
                    }]
                }
                Err(rejection) => {
                    entry.go_idle(rejection);
                    if had_pending_work {
                        vec![Effect::CancelPending { field }]
                    } else {
                        Vec::new()
                    }
                }
            };
            state.mark_dirty();
            effects
        }
        Msg::DebounceElapsed { field, generation } => {
            let request = state
                .field_mut(field)
                .and_then(|entry| entry.take_debounced(generation));
            match request {
                Some(request) => vec![Effect::FetchPreview {
                    field,
                    generation,
                    request,
                }],
                None => Vec::new(),
            }
        }
        Msg::FetchSettled {
            field,
            generation,
            result,
        } => {
            let applied = state
                .field_mut(field)
                .is_some_and(|entry| entry.settle(generation, result));
            if applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FieldClosed { field } => {
            if state.remove_field(field) {
                state.mark_dirty();
                vec![Effect::CancelPending { field }]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
