use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategies for locating an element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector
    Css(String),

    /// Text content (exact or partial match)
    Text { content: String, exact: bool },

    /// Accessibility role and accessible name
    Role { role: String, name: String },
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    pub fn text(content: impl Into<String>) -> Self {
        Selector::Text {
            content: content.into(),
            exact: false,
        }
    }

    pub fn exact_text(content: impl Into<String>) -> Self {
        Selector::Text {
            content: content.into(),
            exact: true,
        }
    }

    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Selector::Role {
            role: role.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css:{}", s),
            Selector::Text { content, exact } => {
                if *exact {
                    write!(f, "text:exact:'{}'", content)
                } else {
                    write!(f, "text:partial:'{}'", content)
                }
            }
            Selector::Role { role, name } => write!(f, "role:{}[name='{}']", role, name),
        }
    }
}

/// Lifecycle states an element can be waited on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementState {
    /// Present in the DOM, visibility not required
    Attached,

    /// Present and rendered
    Visible,

    /// Absent or not rendered
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        assert_eq!(Selector::css("#userName").to_string(), "css:#userName");
        assert_eq!(
            Selector::exact_text("Submit").to_string(),
            "text:exact:'Submit'"
        );
        assert_eq!(
            Selector::role("button", "Save").to_string(),
            "role:button[name='Save']"
        );
    }
}
