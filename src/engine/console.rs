// In-game console: a bounded line buffer the overlay draws and the detector writes to.
// Every line is mirrored to the `log` facade so headless runs still see it.

use std::collections::VecDeque;

use crate::detector::DiagnosticSink;

/// Lines kept before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 256;

pub struct Console {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Console {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl DiagnosticSink for Console {
    fn log(&mut self, line: &str) {
        log::info!(target: "wall_probe::console", "{line}");
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    fn clear(&mut self) {
        let count = self.lines.len();
        log::debug!(target: "wall_probe::console", "clear ({count} lines)");
        self.lines.clear();
    }
}
