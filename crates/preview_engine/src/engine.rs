use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use preview_core::{FieldId, Generation};
use preview_logging::{preview_debug, preview_trace};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, PreviewSource};

enum EngineCommand {
    ScheduleDebounce {
        field: FieldId,
        generation: Generation,
        delay: Duration,
    },
    Extract {
        field: FieldId,
        generation: Generation,
        url: String,
    },
    Cancel {
        field: FieldId,
    },
}

/// Sends work to the engine thread. Cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end for timer and fetch outcomes.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until an event arrives; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl EngineHandle {
    /// Starts the engine thread with its own tokio runtime.
    ///
    /// The thread exits once every handle has been dropped.
    pub fn new(source: Arc<dyn PreviewSource>) -> io::Result<(Self, EngineEvents)> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("preview-engine".to_string())
            .spawn(move || {
                let mut slots = FieldSlots::default();
                while let Ok(command) = cmd_rx.recv() {
                    let token = match &command {
                        EngineCommand::ScheduleDebounce {
                            field, generation, ..
                        }
                        | EngineCommand::Extract {
                            field, generation, ..
                        } => slots.claim(*field, *generation),
                        EngineCommand::Cancel { field } => {
                            slots.release(*field);
                            continue;
                        }
                    };
                    runtime.spawn(run_command(
                        source.clone(),
                        command,
                        token,
                        event_tx.clone(),
                    ));
                }
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    /// Starts a debounce timer, superseding any timer or fetch running for the field.
    pub fn schedule_debounce(&self, field: FieldId, generation: Generation, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleDebounce {
            field,
            generation,
            delay,
        });
    }

    pub fn extract(&self, field: FieldId, generation: Generation, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Extract {
            field,
            generation,
            url: url.into(),
        });
    }

    pub fn cancel(&self, field: FieldId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { field });
    }
}

/// One cancellation token per field, tied to the generation that owns it.
#[derive(Default)]
struct FieldSlots {
    slots: HashMap<FieldId, (Generation, CancellationToken)>,
}

impl FieldSlots {
    fn claim(&mut self, field: FieldId, generation: Generation) -> CancellationToken {
        if let Some((owner, token)) = self.slots.get(&field) {
            if *owner == generation {
                return token.clone();
            }
            token.cancel();
        }
        let token = CancellationToken::new();
        self.slots.insert(field, (generation, token.clone()));
        token
    }

    fn release(&mut self, field: FieldId) {
        if let Some((_, token)) = self.slots.remove(&field) {
            token.cancel();
        }
    }
}

async fn run_command(
    source: Arc<dyn PreviewSource>,
    command: EngineCommand,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::ScheduleDebounce {
            field,
            generation,
            delay,
        } => {
            tokio::select! {
                _ = token.cancelled() => {
                    preview_trace!("debounce field={} generation={} superseded", field, generation);
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = event_tx.send(EngineEvent::DebounceElapsed { field, generation });
                }
            }
        }
        EngineCommand::Extract {
            field,
            generation,
            url,
        } => {
            tokio::select! {
                _ = token.cancelled() => {
                    preview_debug!("fetch field={} generation={} cancelled url={}", field, generation, url);
                }
                result = source.preview(&url) => {
                    let _ = event_tx.send(EngineEvent::PreviewSettled { field, generation, result });
                }
            }
        }
        EngineCommand::Cancel { .. } => {}
    }
}
