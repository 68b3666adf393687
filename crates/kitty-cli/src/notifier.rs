//! Output notification
//!
//! The command line prints to the console; tests and other hosts can plug in
//! their own sink.

/// Receives everything the host reports to the user
pub trait Notifier: Send + Sync {
    /// Regular output, such as the rewritten buffer
    fn on_output(&self, content: &str);

    /// An error message
    fn on_error(&self, content: &str);
}

/// Console notifier: output to stdout, errors to stderr
pub struct DefaultNotifier;

impl DefaultNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DefaultNotifier {
    fn on_output(&self, content: &str) {
        if !content.is_empty() {
            println!("{content}");
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{content}");
    }
}

impl Default for DefaultNotifier {
    fn default() -> Self {
        Self::new()
    }
}
