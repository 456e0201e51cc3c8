//! Interactive terminal client: each stdin line replaces the URL being typed.
mod effects;
mod render;

use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use preview_core::{update, AppState, CoreConfig, FieldId, Msg};
use preview_engine::PreviewSource;
use preview_logging::{preview_debug, preview_info};

use effects::EffectRunner;

/// The terminal has a single input box.
const INPUT_FIELD: FieldId = 1;

pub enum AppEvent {
    Msg(Msg),
    InputClosed,
}

pub fn run(source: Arc<dyn PreviewSource>, config: CoreConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner =
        EffectRunner::new(source, event_tx.clone()).context("failed to start preview engine")?;
    spawn_input_reader(event_tx);
    preview_info!("Type or paste a URL; previews appear once input settles");

    let mut state = AppState::with_config(config);
    let mut input_closed = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => state = dispatch(state, msg, &runner),
            AppEvent::InputClosed => input_closed = true,
        }
        if input_closed && !state.preview(INPUT_FIELD).is_pending() {
            break;
        }
    }
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(text) = line else { break };
            let msg = Msg::InputChanged {
                field: INPUT_FIELD,
                text,
            };
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    if let Msg::FetchSettled {
        field, generation, ..
    } = &msg
    {
        if state.current_generation(*field) != Some(*generation) {
            preview_debug!(
                "Dropping stale preview field={} generation={}",
                field,
                generation
            );
        }
    }

    let (mut state, effects) = update(state, msg);
    runner.run(effects);

    if state.consume_dirty() {
        if let Some(view) = state.view().field(INPUT_FIELD) {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", render::render(view));
            let _ = stdout.flush();
        }
    }
    state
}
