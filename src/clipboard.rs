use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Platform clipboard. Access may be denied at any time; callers log the
/// error and carry on.
pub trait Clipboard {
    fn read_text(&mut self) -> GridResult<String>;
    fn write_text(&mut self, text: &str) -> GridResult<()>;
}

/// Process-local clipboard. `deny()` makes every access fail, which is how a
/// browser behaves without clipboard permission.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        MemoryClipboard {
            contents: Some(text.into()),
            denied: false,
        }
    }

    pub fn deny(&mut self) {
        self.denied = true;
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> GridResult<String> {
        if self.denied {
            return Err(GridError::Clipboard("read permission denied".to_string()));
        }
        Ok(self.contents.clone().unwrap_or_default())
    }

    fn write_text(&mut self, text: &str) -> GridResult<()> {
        if self.denied {
            return Err(GridError::Clipboard("write permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Last value copied out of the grid and where it came from.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CopiedCell {
    pub value: String,
    pub row: usize,
    pub column: String,
}

/// A key press as the front-end reports it.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: char,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Copy,
    Paste,
}

impl KeyInput {
    pub fn ctrl(key: char) -> Self {
        KeyInput {
            key,
            ctrl: true,
            meta: false,
        }
    }

    /// Ctrl (or Cmd) + C / V. Anything else is not ours.
    pub fn shortcut(&self) -> Option<Shortcut> {
        if !(self.ctrl || self.meta) {
            return None;
        }
        match self.key {
            'c' => Some(Shortcut::Copy),
            'v' => Some(Shortcut::Paste),
            _ => None,
        }
    }
}
