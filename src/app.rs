//! Screen orchestration layer
//!
//! `ConfirmScreen` owns one controller for the lifetime of the screen and wires
//! it to input actions, backup responses and animation timing. It keeps only
//! presenter state (the typed text, the retry notice, timers); everything the
//! user sees about the PIN flow comes from the controller.

pub mod runtime;

use crate::confirm::{PinConfirmationController, SaveAnimation};
use crate::error::Result;
use crate::input::InputAction;
use crate::render::{ScreenRenderer, ScreenView};
use log::{debug, warn};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant};

pub use runtime::run_terminal_screen;

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);
const RETRY_NOTICE: &str = "Enter your PIN again to retry.";

/// How the screen was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOutcome {
    PinCreated,
    Cancelled,
}

enum ScreenEvent {
    Backup(crate::backup::BackupResponse),
    AnimationFinished,
    Input(Option<InputAction>),
    SpinnerTick,
}

/// Presenter for the confirmation screen.
pub struct ConfirmScreen<R: ScreenRenderer> {
    controller: PinConfirmationController,
    renderer: R,
    /// Text typed so far; mirrors the controller entry before parsing.
    entry: String,
    animation: Duration,
    animation_deadline: Option<Instant>,
    notice: Option<String>,
    spinner_frame: usize,
}

impl<R: ScreenRenderer> ConfirmScreen<R> {
    pub fn new(controller: PinConfirmationController, renderer: R, animation: Duration) -> Self {
        Self {
            controller,
            renderer,
            entry: String::new(),
            animation,
            animation_deadline: None,
            notice: None,
            spinner_frame: 0,
        }
    }

    pub fn controller(&self) -> &PinConfirmationController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run the screen until the PIN is created or the user leaves.
    ///
    /// The renderer is cleaned up on every exit path, including a failed
    /// `initialize`. A closed action channel counts as leaving the screen.
    pub async fn run(
        &mut self,
        actions: &mut UnboundedReceiver<InputAction>,
    ) -> Result<ScreenOutcome> {
        if let Err(err) = self.renderer.initialize() {
            if let Err(cleanup) = self.renderer.cleanup() {
                warn!("terminal cleanup after failed initialization: {}", cleanup);
            }
            return Err(err);
        }
        let outcome = self.event_loop(actions).await;
        let cleanup = self.renderer.cleanup();
        let outcome = outcome?;
        cleanup?;
        Ok(outcome)
    }

    async fn event_loop(
        &mut self,
        actions: &mut UnboundedReceiver<InputAction>,
    ) -> Result<ScreenOutcome> {
        let mut spinner = time::interval(SPINNER_INTERVAL);

        loop {
            self.render()?;

            let deadline = self.animation_deadline;
            let loading = self.controller.save_animation() == SaveAnimation::Loading;
            let event = tokio::select! {
                biased;
                Some(response) = self.controller.next_response() => ScreenEvent::Backup(response),
                _ = wait_until(deadline) => ScreenEvent::AnimationFinished,
                action = actions.recv() => ScreenEvent::Input(action),
                _ = spinner.tick(), if loading => ScreenEvent::SpinnerTick,
            };

            match event {
                ScreenEvent::Backup(response) => {
                    self.controller.handle_response(response)?;
                    if self.controller.save_animation().is_finished() {
                        self.animation_deadline = Some(Instant::now() + self.animation);
                    }
                }
                ScreenEvent::AnimationFinished => {
                    if let Some(outcome) = self.finish_animation() {
                        return Ok(outcome);
                    }
                }
                ScreenEvent::Input(Some(action)) => {
                    if let Some(outcome) = self.handle_action(action)? {
                        return Ok(outcome);
                    }
                }
                ScreenEvent::Input(None) => return Ok(ScreenOutcome::Cancelled),
                ScreenEvent::SpinnerTick => {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
        }
    }

    /// Apply one input action. Returns an outcome when the screen should close.
    pub fn handle_action(&mut self, action: InputAction) -> Result<Option<ScreenOutcome>> {
        match action {
            InputAction::Cancel => return Ok(Some(ScreenOutcome::Cancelled)),
            InputAction::Resize { .. } => {}
            _ if !self.accepting_input() => {
                debug!("ignoring {:?} while the PIN is being saved", action);
            }
            InputAction::Type(ch) => {
                if self.controller.keyboard_mode().accepts(ch) {
                    self.entry.push(ch);
                    self.notice = None;
                    self.controller.set_user_entry(&self.entry);
                }
            }
            InputAction::Backspace => {
                if self.entry.pop().is_some() {
                    self.controller.set_user_entry(&self.entry);
                }
            }
            InputAction::ToggleKeyboard => {
                self.controller.toggle_keyboard_mode();
                self.entry.clear();
                self.controller.set_user_entry(&self.entry);
            }
            InputAction::Submit => {
                if self.controller.user_entry().meets_minimum_length() {
                    self.entry.clear();
                    self.notice = None;
                    self.controller.confirm()?;
                }
            }
        }
        Ok(None)
    }

    /// Called when the success/failure animation has finished playing.
    fn finish_animation(&mut self) -> Option<ScreenOutcome> {
        self.animation_deadline = None;
        self.controller.on_loading_animation_complete();
        match self.controller.save_animation() {
            SaveAnimation::Success => Some(ScreenOutcome::PinCreated),
            SaveAnimation::Failure => {
                self.notice = Some(RETRY_NOTICE.to_string());
                None
            }
            SaveAnimation::None | SaveAnimation::Loading => None,
        }
    }

    fn accepting_input(&self) -> bool {
        match self.controller.save_animation() {
            SaveAnimation::Loading | SaveAnimation::Success => false,
            SaveAnimation::Failure => self.animation_deadline.is_none(),
            SaveAnimation::None => true,
        }
    }

    pub fn view(&self) -> ScreenView {
        let state = self.controller.state();
        ScreenView {
            label: state.label,
            save_animation: state.save_animation,
            keyboard_mode: state.keyboard_mode,
            entry_length: self.entry.chars().count(),
            notice: self.notice.clone(),
            spinner_frame: self.spinner_frame,
        }
    }

    fn render(&mut self) -> Result<()> {
        let view = self.view();
        self.renderer.render(&view)
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
