//! Key bindings.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextItem,
    PreviousItem,
    FirstItem,
    LastItem,
    Refresh,
    /// Pretend a file was written, as an editor save would report it.
    SimulateSave,
    /// Move focus to the next window of the tabpage.
    CycleWindow,
    CloseLeftPane,
    CloseRightPane,
    CloseTabpage,
    EnsureLayout,
    Quit,
}

/// A single key binding with its help hint.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub hint: &'static str,
    pub description: &'static str,
    pub command: Command,
}

impl KeyBinding {
    fn new(code: KeyCode, hint: &'static str, description: &'static str, command: Command) -> Self {
        Self {
            code,
            hint,
            description,
            command,
        }
    }
}

/// Get the default keymap
pub fn default_keymap() -> Vec<KeyBinding> {
    use Command::*;

    vec![
        // Navigation
        KeyBinding::new(KeyCode::Char('j'), "j", "next", NextItem),
        KeyBinding::new(KeyCode::Down, "↓", "next", NextItem),
        KeyBinding::new(KeyCode::Char('k'), "k", "previous", PreviousItem),
        KeyBinding::new(KeyCode::Up, "↑", "previous", PreviousItem),
        KeyBinding::new(KeyCode::Char('g'), "g", "first", FirstItem),
        KeyBinding::new(KeyCode::Char('G'), "G", "last", LastItem),
        KeyBinding::new(KeyCode::Tab, "Tab", "next window", CycleWindow),
        // List
        KeyBinding::new(KeyCode::Char('r'), "r", "refresh", Refresh),
        KeyBinding::new(KeyCode::Char('w'), "w", "save", SimulateSave),
        // Layout
        KeyBinding::new(KeyCode::Char('L'), "L", "close left", CloseLeftPane),
        KeyBinding::new(KeyCode::Char('R'), "R", "close right", CloseRightPane),
        KeyBinding::new(KeyCode::Char('T'), "T", "close tab", CloseTabpage),
        KeyBinding::new(KeyCode::Char('e'), "e", "ensure layout", EnsureLayout),
        // General
        KeyBinding::new(KeyCode::Char('q'), "q", "quit", Quit),
        KeyBinding::new(KeyCode::Esc, "Esc", "quit", Quit),
    ]
}

/// Find the command bound to `key`.
pub fn lookup(keymap: &[KeyBinding], key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }
    keymap
        .iter()
        .find(|binding| binding.code == key.code)
        .map(|binding| binding.command)
}

/// One-line help text, one entry per command.
pub fn help_line(keymap: &[KeyBinding]) -> String {
    let mut seen = Vec::new();
    let mut parts = Vec::new();
    for binding in keymap {
        if seen.contains(&binding.command) {
            continue;
        }
        seen.push(binding.command);
        parts.push(format!("{} {}", binding.hint, binding.description));
    }
    parts.join("  ")
}
