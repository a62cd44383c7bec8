//! Progress log shown on the terminal-styled login screen.

const BANNER: [&str; 3] = [
    "UT Social System v1.0.0",
    "Cybernetic Interface Initialized...",
    "Enter credentials to access the network...",
];

/// Append-only, ordered list of human-readable progress lines.
///
/// Lines that start with `>` are events; the rest is banner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLog {
    lines: Vec<String>,
}

impl TerminalLog {
    /// A log seeded with the startup banner.
    pub fn new() -> Self {
        Self {
            lines: BANNER.iter().map(|line| line.to_string()).collect(),
        }
    }

    /// Appends an event line, prefixing it with `> `.
    pub fn event(&mut self, message: impl AsRef<str>) {
        self.lines.push(format!("> {}", message.as_ref()));
    }

    /// Appends `> ERROR: <message>`.
    pub fn error(&mut self, message: impl AsRef<str>) {
        self.event(format!("ERROR: {}", message.as_ref()));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended after the first `from` lines.
    pub fn since(&self, from: usize) -> &[String] {
        &self.lines[from.min(self.lines.len())..]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for TerminalLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a line is an event (rendered highlighted) rather than banner text.
pub fn is_event_line(line: &str) -> bool {
    line.starts_with('>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_banner() {
        let log = TerminalLog::new();
        assert_eq!(log.len(), 3);
        assert_eq!(log.lines()[0], "UT Social System v1.0.0");
        assert!(!is_event_line(&log.lines()[2]));
    }

    #[test]
    fn test_event_and_error_lines_are_appended_in_order() {
        let mut log = TerminalLog::new();
        log.event("Attempting login...");
        log.error("bad credentials");
        assert_eq!(
            log.since(3),
            &["> Attempting login...".to_string(), "> ERROR: bad credentials".to_string()]
        );
        assert!(is_event_line(&log.lines()[4]));
        assert!(log.since(99).is_empty());
    }
}
