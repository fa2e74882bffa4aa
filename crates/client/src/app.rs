//! Frame loop tying the runtime, keyboard input and terminal UI together.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent};
use game_content::MapContent;
use game_core::{Admission, AnimationSet, EngineEvent};
use runtime::{Event, Runtime, RuntimeError};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::{self, MissedTickBehavior};

use crate::input::{InputHandler, KeyAction};
use crate::terminal::Tui;
use crate::ui::{self, View};

const TICK_RATE_HZ: f64 = 60.0;
/// Upper bound on one simulation step after a stall.
const MAX_FRAME_DT: f32 = 0.1;

pub struct App {
    runtime: Runtime,
    map: MapContent,
    animations: AnimationSet,
    input: InputHandler,
    events: broadcast::Receiver<Event>,
    status: Option<String>,
}

impl App {
    pub fn new(runtime: Runtime, map: MapContent, animations: AnimationSet) -> Self {
        let events = runtime.subscribe_events();
        Self {
            runtime,
            map,
            animations,
            input: InputHandler::new(),
            events,
            status: None,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        let mut ticker = time::interval(Duration::from_secs_f64(1.0 / TICK_RATE_HZ));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();

        loop {
            ticker.tick().await;

            if self.handle_input()? {
                break;
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32().min(MAX_FRAME_DT);
            last = now;

            let frame = self.runtime.tick(dt);
            self.drain_events();

            let config = self.runtime.config();
            let view = View {
                map: &self.map,
                animations: &self.animations,
                frame: &frame,
                tile_size: config.motion.tile_size,
                hazard_tile: &config.hazard_tile,
                prompt: self.input.buffer(),
                focus: self.input.focus(),
                pending: self.runtime.pending_requests(),
                status: self.status.as_deref(),
            };
            terminal.draw(|f| ui::render(f, &view))?;
        }

        tracing::info!("Shutting down runtime");
        self.runtime.shutdown().await?;
        Ok(())
    }

    /// Drains pending key presses without blocking. Returns `true` on quit.
    fn handle_input(&mut self) -> Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            let TermEvent::Key(key) = event::read()? else {
                continue;
            };
            match self.input.handle_key(key) {
                KeyAction::Quit => return Ok(true),
                KeyAction::Move(direction) => {
                    if self.runtime.push_direction(direction) == Admission::Locked {
                        self.status = Some(format!("{} is blocked here", direction));
                    }
                }
                KeyAction::Submit(text) => match self.runtime.submit(&text) {
                    Ok(id) => {
                        tracing::info!(id, "prompt submitted: {}", text);
                        self.status = None;
                    }
                    Err(RuntimeError::EmptyPrompt) => {}
                    Err(e) => {
                        tracing::warn!("Failed to submit prompt: {}", e);
                        self.status = Some(e.to_string());
                    }
                },
                KeyAction::Clear => {
                    self.runtime.clear_display();
                    self.status = None;
                }
                KeyAction::None => {}
            }
        }
        Ok(false)
    }

    /// Turns movement refusals into a status hint.
    fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(Event::Engine(EngineEvent::StepRejected { reason, .. })) => {
                    self.status = Some(reason.to_string());
                }
                Ok(Event::Engine(EngineEvent::MoveIgnored { steps })) => {
                    self.status = Some(format!("movement disabled, ignored {} steps", steps));
                }
                Ok(Event::Engine(EngineEvent::StepAccepted { .. })) => {
                    self.status = None;
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} stale events", skipped);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}
