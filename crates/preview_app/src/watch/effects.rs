use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use preview_core::{Effect, Msg};
use preview_engine::{EngineEvent, EngineEvents, EngineHandle, PreviewSource};
use preview_logging::{preview_info, preview_warn};

use super::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        source: Arc<dyn PreviewSource>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let (engine, events) = EngineHandle::new(source)?;
        spawn_event_loop(events, event_tx);
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleDebounce {
                    field,
                    generation,
                    delay,
                } => {
                    self.engine.schedule_debounce(field, generation, delay);
                }
                Effect::FetchPreview {
                    field,
                    generation,
                    request,
                } => {
                    preview_info!(
                        "FetchPreview field={} generation={} url={}",
                        field,
                        generation,
                        request.url
                    );
                    self.engine.extract(field, generation, request.url.as_str());
                }
                Effect::CancelPending { field } => self.engine.cancel(field),
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let msg = match event {
                EngineEvent::DebounceElapsed { field, generation } => {
                    Msg::DebounceElapsed { field, generation }
                }
                EngineEvent::PreviewSettled {
                    field,
                    generation,
                    result,
                } => {
                    if let Err(err) = &result {
                        preview_warn!(
                            "Preview field={} generation={} failed: {}",
                            field,
                            generation,
                            err
                        );
                    }
                    Msg::FetchSettled {
                        field,
                        generation,
                        result,
                    }
                }
            };
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}
