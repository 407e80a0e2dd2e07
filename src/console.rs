//! Console collaborator: normal output and error channel.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

pub trait Console {
    /// Emit one line of normal output.
    fn out(&mut self, line: &str);

    /// Emit one line on the error channel.
    fn err(&mut self, line: &str);
}

/// Writes to stdout and stderr, coloring errors when stderr is a terminal
#[derive(Debug, Clone)]
pub struct StdConsole {
    color: bool,
}

impl StdConsole {
    pub fn new(color: bool) -> Self {
        Self {
            color: color && std::io::stderr().is_terminal(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Console for StdConsole {
    fn out(&mut self, line: &str) {
        println!("{}", line);
    }

    fn err(&mut self, line: &str) {
        if self.color {
            eprintln!("{}", line.red());
        } else {
            eprintln!("{}", line);
        }
    }
}

/// Collects lines in memory
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    pub out: Vec<String>,
    pub err: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.out.clear();
        self.err.clear();
    }
}

impl Console for BufferConsole {
    fn out(&mut self, line: &str) {
        self.out.push(line.to_string());
    }

    fn err(&mut self, line: &str) {
        self.err.push(line.to_string());
    }
}
