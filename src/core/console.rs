//! Narrow console capability for gameplay messages
//!
//! The core never depends on a concrete UI type; collaborators hand in
//! anything that can accept a message line.

/// Message sink exposed to the simulation systems
pub trait Console {
    fn add_message(&mut self, text: &str);
}

/// Console that discards everything (tests, headless runs)
#[derive(Debug, Default)]
pub struct NullConsole;

impl Console for NullConsole {
    fn add_message(&mut self, _text: &str) {}
}

/// Console that buffers messages in memory
///
/// Used by the demo binary and by tests that assert on message content.
#[derive(Debug, Default)]
pub struct BufferedConsole {
    pub messages: Vec<String>,
}

impl Console for BufferedConsole {
    fn add_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_console_records_messages() {
        let mut console = BufferedConsole::default();
        console.add_message("a rat dies");
        console.add_message("you advance to level 2");
        assert_eq!(console.messages.len(), 2);
        assert_eq!(console.messages[0], "a rat dies");
    }
}
