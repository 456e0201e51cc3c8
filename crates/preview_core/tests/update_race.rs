use preview_core::{update, AppState, Effect, Msg, PreviewRecord, PreviewState};

fn input(state: AppState, field: u64, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::InputChanged {
            field,
            text: text.to_string(),
        },
    )
}

fn fetched_urls(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPreview { request, .. } => Some(request.url.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn quick_retype_fetches_only_latest_input() {
    let (state, first) = input(AppState::new(), 1, "https://a.test");
    let (state, second) = input(state, 1, "https://b.test");
    assert!(matches!(
        first.as_slice(),
        [Effect::ScheduleDebounce { generation: 1, .. }]
    ));
    assert!(matches!(
        second.as_slice(),
        [Effect::ScheduleDebounce { generation: 2, .. }]
    ));

    // Even if the superseded timer was not physically cancelled, it fetches nothing.
    let mut issued = Vec::new();
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            field: 1,
            generation: 1,
        },
    );
    issued.extend(fetched_urls(&effects));
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            field: 1,
            generation: 2,
        },
    );
    issued.extend(fetched_urls(&effects));
    assert_eq!(issued, vec!["https://b.test/".to_string()]);

    let b_record = PreviewRecord {
        title: Some("B".to_string()),
        ..PreviewRecord::new("https://b.test/")
    };
    let (state, _) = update(
        state,
        Msg::FetchSettled {
            field: 1,
            generation: 2,
            result: Ok(b_record.clone()),
        },
    );

    // A late answer for a.test lands after b.test resolved.
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::FetchSettled {
            field: 1,
            generation: 1,
            result: Ok(PreviewRecord::new("https://a.test/")),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert_eq!(state.preview(1), PreviewState::Resolved(b_record));
}

#[test]
fn slow_early_fetch_cannot_overwrite_pending_later_episode() {
    let (state, _) = input(AppState::new(), 1, "https://a.test");
    let (state, _) = update(
        state,
        Msg::DebounceElapsed {
            field: 1,
            generation: 1,
        },
    );
    // User keeps typing while a.test is in flight.
    let (state, _) = input(state, 1, "https://b.test");
    let (state, _) = update(
        state,
        Msg::FetchSettled {
            field: 1,
            generation: 1,
            result: Ok(PreviewRecord::new("https://a.test/")),
        },
    );
    assert_eq!(state.preview(1), PreviewState::Pending);
}

#[test]
fn fields_do_not_interfere() {
    let (state, _) = input(AppState::new(), 1, "https://a.test");
    let (state, _) = input(state, 2, "https://b.test");
    let (state, _) = update(
        state,
        Msg::DebounceElapsed {
            field: 1,
            generation: 1,
        },
    );
    let (state, _) = update(
        state,
        Msg::FetchSettled {
            field: 1,
            generation: 1,
            result: Ok(PreviewRecord::new("https://a.test/")),
        },
    );

    assert_eq!(
        state.preview(1),
        PreviewState::Resolved(PreviewRecord::new("https://a.test/"))
    );
    assert_eq!(state.preview(2), PreviewState::Pending);
    let ids: Vec<_> = state.view().fields.iter().map(|f| f.field).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn closed_field_drops_late_results() {
    let (state, _) = input(AppState::new(), 7, "https://a.test");
    let (state, _) = update(
        state,
        Msg::DebounceElapsed {
            field: 7,
            generation: 1,
        },
    );
    let (state, effects) = update(state, Msg::FieldClosed { field: 7 });
    assert_eq!(effects, vec![Effect::CancelPending { field: 7 }]);

    let (state, effects) = update(
        state,
        Msg::FetchSettled {
            field: 7,
            generation: 1,
            result: Ok(PreviewRecord::new("https://a.test/")),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().field(7).is_none());

    let (_state, effects) = update(state, Msg::FieldClosed { field: 7 });
    assert!(effects.is_empty());
}
