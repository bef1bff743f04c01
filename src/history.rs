//! Append-only log of the command lines entered during a session.

use std::io::Write;

/// Owns a copy of every recorded line in strict insertion order. The whole
/// log is released in one batch when it is dropped at session end.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a copy of `line` at the tail.
    pub fn append(&mut self, line: &str) {
        self.entries.push(line.to_owned());
    }

    /// Writes every recorded line in insertion order, one per line.
    pub fn print_all(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_entries_in_insertion_order() {
        let mut log = HistoryLog::new();
        for line in ["ls", "cd /tmp", "echo hello | cat"] {
            log.append(line);
        }

        let mut out = Vec::new();
        log.print_all(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ls\ncd /tmp\necho hello | cat\n"
        );
    }

    #[test]
    fn empty_log_prints_nothing() {
        let log = HistoryLog::new();
        let mut out = Vec::new();
        log.print_all(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut log = HistoryLog::new();
        log.append("ls");
        log.append("ls");
        assert_eq!(log.len(), 2);
    }
}
