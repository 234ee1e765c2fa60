//! Abstract input key event, independent of any terminal library.
//!
//! Frontends convert their native key events into `InputKey` at the
//! boundary; the headless driver parses them from text (`ctrl+enter`).

use std::fmt;

/// Abstract input key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier (Ctrl+q, Ctrl+c, ...)
    CharCtrl(char),
    /// Enter with Ctrl (or Cmd) held
    CtrlEnter,
    Enter,
    Esc,
}

impl InputKey {
    /// Parse a chord such as `ctrl+enter`, `ctrl+q`, `esc` or `a`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (ctrl, key) = match lower
            .strip_prefix("ctrl+")
            .or_else(|| lower.strip_prefix("cmd+"))
        {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };

        match (ctrl, key) {
            (true, "enter") => Some(InputKey::CtrlEnter),
            (false, "enter") => Some(InputKey::Enter),
            (false, "esc") => Some(InputKey::Esc),
            (ctrl, k) => {
                let mut chars = k.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Some(if ctrl {
                    InputKey::CharCtrl(c)
                } else {
                    InputKey::Char(c)
                })
            }
        }
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKey::Char(c) => write!(f, "{}", c),
            InputKey::CharCtrl(c) => write!(f, "ctrl+{}", c),
            InputKey::CtrlEnter => f.write_str("ctrl+enter"),
            InputKey::Enter => f.write_str("enter"),
            InputKey::Esc => f.write_str("esc"),
        }
    }
}
