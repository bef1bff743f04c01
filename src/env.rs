use std::env as stdenv;

/// Session-level state shared between the loop and the built-ins.
#[derive(Debug, Default)]
pub struct Environment {
    /// When set to true, indicates that the interactive loop should end.
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name for the prompt, looked up from `USER` on every call so
    /// the prompt tracks the live process environment.
    pub fn username(&self) -> String {
        stdenv::var("USER").unwrap_or_else(|_| String::from("unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_does_not_request_exit() {
        assert!(!Environment::new().should_exit);
    }

    #[test]
    fn username_always_renders() {
        // Whatever USER holds (or doesn't), the prompt gets a name.
        assert!(!Environment::new().username().is_empty());
    }
}
