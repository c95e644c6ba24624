use page_port::Selector;

/// A single idempotent-intent UI operation.
///
/// `Click` and `Press` are distinct on purpose: clicking a submit button and
/// submitting via a keystroke are different page interactions and must not be
/// conflated by callers wanting "submit" semantics.
#[derive(Debug, Clone)]
pub enum Action {
    /// Clear the field, set `value`, and verify the read-back matches
    Fill { target: Selector, value: String },

    /// Click the element; no built-in verification
    Click { target: Selector },

    /// Wait for visibility and read the element's text
    ReadText { target: Selector },

    /// Send a key press (e.g. "Enter") to the element; no built-in
    /// verification
    Press { target: Selector, key: String },
}

impl Action {
    pub fn fill(target: Selector, value: impl Into<String>) -> Self {
        Action::Fill {
            target,
            value: value.into(),
        }
    }

    pub fn click(target: Selector) -> Self {
        Action::Click { target }
    }

    pub fn read_text(target: Selector) -> Self {
        Action::ReadText { target }
    }

    pub fn press(target: Selector, key: impl Into<String>) -> Self {
        Action::Press {
            target,
            key: key.into(),
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Fill { .. } => "fill",
            Action::Click { .. } => "click",
            Action::ReadText { .. } => "read_text",
            Action::Press { .. } => "press",
        }
    }

    pub fn target(&self) -> &Selector {
        match self {
            Action::Fill { target, .. }
            | Action::Click { target }
            | Action::ReadText { target }
            | Action::Press { target, .. } => target,
        }
    }
}
