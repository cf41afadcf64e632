use crate::config::hotkeys::{get_action_for_event, HotkeyAction};
use crate::state::State;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use ratatui::layout::Rect;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
pub const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Resize(u16, u16),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            let polled = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Input(key))
                    }
                    Ok(CrosstermEvent::Resize(width, height)) => {
                        Some(Event::Resize(width, height))
                    }
                    Ok(_) => None,
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => None,
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            };
            if let Some(event) = polled {
                if tx_clone.send(event).is_err() {
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Resize(width, height) => {
                state.set_terminal_size(Rect::new(0, 0, width, height));
                Ok(true)
            }
            Event::Tick => Ok(true),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply one key press to the state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    let mode = state.mode().input_mode();
    let action = get_action_for_event(&key, mode, state.get_hotkeys());
    let result = match action {
        Some(HotkeyAction::Quit) => {
            debug!("Received application exit request.");
            return false;
        }
        Some(HotkeyAction::ConfirmYes) => state.answer_confirmation(true),
        Some(HotkeyAction::ConfirmNo) => state.answer_confirmation(false),
        Some(HotkeyAction::Cancel) if state.mode().is_confirming() => {
            state.answer_confirmation(false)
        }
        Some(HotkeyAction::Cancel) => {
            state.cancel();
            Ok(())
        }
        Some(HotkeyAction::FocusNext) => {
            state.next_focus();
            Ok(())
        }
        Some(HotkeyAction::FocusPrev) => {
            state.previous_focus();
            Ok(())
        }
        Some(HotkeyAction::Activate) => state.activate_focused(false),
        Some(HotkeyAction::ActivateNewContext) => state.activate_focused(true),
        Some(HotkeyAction::ToggleSidebar) => {
            state.toggle_sidebar();
            Ok(())
        }
        Some(HotkeyAction::ScrollDown) => {
            state.scroll_down();
            Ok(())
        }
        Some(HotkeyAction::ScrollUp) => {
            state.scroll_up();
            Ok(())
        }
        None if !state.mode().is_confirming() => {
            state.other_key();
            Ok(())
        }
        None => Ok(()),
    };
    if let Err(e) = result {
        debug!("Ignored key {:?}: {}", key.code, e);
    }
    true
}
