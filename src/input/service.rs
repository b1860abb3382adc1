//! High-level input service.
//!
//! Consumes raw events, maps keys to screen actions, and forwards them to the
//! screen loop. Keyboard-mode filtering happens in the screen, which owns the
//! controller that knows the current mode.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use log::error;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// High-level input actions understood by the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// A printable character for the PIN field.
    Type(char),
    Backspace,
    /// Confirm the entered PIN.
    Submit,
    ToggleKeyboard,
    /// Leave the screen.
    Cancel,
    Resize {
        width: u16,
        height: u16,
    },
}

/// Map a key press to a screen action.
pub fn map_key(key_event: KeyEvent) -> Option<InputAction> {
    let modifiers = key_event.modifiers;
    match key_event.code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Cancel)
        }
        KeyCode::Char(_) if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            None
        }
        KeyCode::Char(ch) if !ch.is_control() => Some(InputAction::Type(ch)),
        KeyCode::Backspace => Some(InputAction::Backspace),
        KeyCode::Enter => Some(InputAction::Submit),
        KeyCode::Tab => Some(InputAction::ToggleKeyboard),
        KeyCode::Esc => Some(InputAction::Cancel),
        _ => None,
    }
}

/// Service responsible for producing `InputAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService {
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(Self::process_raw_event(raw_event));
            while let Some(extra_event) = self.raw_input.pop_pending() {
                actions.extend(Self::process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.pop_pending() {
            actions.extend(Self::process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(event: RawInputEvent) -> Option<InputAction> {
        match event {
            RawInputEvent::Key(key_event) => map_key(key_event),
            RawInputEvent::Resize { width, height } => Some(InputAction::Resize { width, height }),
        }
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the screen loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    error!("input thread error: {}", err);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    #[test]
    fn printable_keys_type_characters() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(key(KeyCode::Char('7'))),
            vec![InputAction::Type('7')]
        );
        assert_eq!(
            service.process_event(Event::Key(KeyEvent::new(
                KeyCode::Char('Q'),
                KeyModifiers::SHIFT
            ))),
            vec![InputAction::Type('Q')]
        );
    }

    #[test]
    fn editing_and_control_keys() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(key(KeyCode::Backspace)),
            vec![InputAction::Backspace]
        );
        assert_eq!(
            service.process_event(key(KeyCode::Enter)),
            vec![InputAction::Submit]
        );
        assert_eq!(
            service.process_event(key(KeyCode::Tab)),
            vec![InputAction::ToggleKeyboard]
        );
        assert_eq!(
            service.process_event(key(KeyCode::Esc)),
            vec![InputAction::Cancel]
        );
        assert_eq!(service.process_event(ctrl('c')), vec![InputAction::Cancel]);
    }

    #[test]
    fn modified_characters_and_unknown_keys_are_dropped() {
        let mut service = InputService::new();
        assert!(service.process_event(ctrl('x')).is_empty());
        assert!(service.process_event(key(KeyCode::F(5))).is_empty());
        assert!(service.process_event(key(KeyCode::Up)).is_empty());
    }

    #[test]
    fn resize_passes_through() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Resize(100, 30)),
            vec![InputAction::Resize {
                width: 100,
                height: 30
            }]
        );
    }
}
