// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct LoggerInner {
    pub(crate) lines: Vec<String>,
}

/// Thread-safe string logger. One is created per challenge operation and its
/// text is returned to the caller on success.
#[derive(Clone, Default)]
pub struct StringLogger {
    pub(crate) debug: bool,
    pub(crate) inner: Arc<Mutex<LoggerInner>>,
}

impl StringLogger {
    /// Call a function and trace the result.
    pub fn call<T>(&self, line: String, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.trace(format!("{line} succeeded")),
            Err(e) => self.warn(format!("{line} failed\n  {e}")),
        }
        result
    }

    /// Add an indented trace line to this logger.
    pub fn indent(&self, line: String, indentation: &str) {
        if !line.is_empty() {
            let indented_line = format!(
                "{indentation}{}",
                line.replace('\n', &format!("\n{indentation}"))
            );
            self.push(indented_line, false);
        }
    }

    /// Create a new string logger.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            inner: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Add a trace line to this logger.
    pub fn trace(&self, line: String) {
        if !line.is_empty() {
            self.push(line, false);
        }
    }

    /// Add a warning or error line to this logger. Echoed to stderr.
    pub fn warn(&self, line: String) {
        if !line.is_empty() {
            self.push(line, true);
        }
    }

    fn push(&self, line: String, warn: bool) {
        if self.debug {
            if warn {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.push(line);
        }
    }
}

impl Display for StringLogger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Ok(inner) = self.inner.lock() {
            f.write_str(&inner.lines.join("\n"))
        } else {
            Ok(())
        }
    }
}
