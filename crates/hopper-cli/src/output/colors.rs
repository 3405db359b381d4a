//! Terminal color detection and ANSI formatting.
//!
//! Colors are dropped when NO_COLOR is set or when either stdout or stderr
//! is not a terminal, so piped output stays clean.

use std::env;
use std::io::{self, IsTerminal};

/// ANSI styling gated on terminal capability
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        let no_color = env::var("NO_COLOR").is_ok();
        let tty = io::stderr().is_terminal() && io::stdout().is_terminal();
        Self {
            enabled: !no_color && tty,
        }
    }

    /// Force disable colors
    #[allow(dead_code)]
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }
}
