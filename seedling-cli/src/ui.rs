//! User-facing terminal output
//!
//! Logging goes to stderr through `tracing`; this module is the human channel.

use colored::Colorize;

/// Sink for user-facing messages
pub trait Ui: Send + Sync {
    /// Informational output
    fn write_line(&self, text: &str);

    /// Warning-level output
    fn write_error(&self, text: &str);
}

/// Writes to the attached terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn write_line(&self, text: &str) {
        println!("{}", text);
    }

    fn write_error(&self, text: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), text.yellow());
    }
}

/// Success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Info message
pub fn info(message: &str) {
    println!("{} {}", "→".blue().bold(), message);
}

/// Section header
pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Ui;
    use std::sync::Mutex;

    /// A line captured by [`RecordingUi`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Line {
        Out(String),
        Err(String),
    }

    /// Keeps every message in memory
    #[derive(Debug, Default)]
    pub struct RecordingUi {
        lines: Mutex<Vec<Line>>,
    }

    impl RecordingUi {
        pub fn lines(&self) -> Vec<Line> {
            self.lines.lock().unwrap().clone()
        }

        pub fn out(&self) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter_map(|l| match l {
                    Line::Out(s) => Some(s),
                    Line::Err(_) => None,
                })
                .collect()
        }

        pub fn err(&self) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter_map(|l| match l {
                    Line::Err(s) => Some(s),
                    Line::Out(_) => None,
                })
                .collect()
        }
    }

    impl Ui for RecordingUi {
        fn write_line(&self, text: &str) {
            self.lines.lock().unwrap().push(Line::Out(text.to_string()));
        }

        fn write_error(&self, text: &str) {
            self.lines.lock().unwrap().push(Line::Err(text.to_string()));
        }
    }
}
