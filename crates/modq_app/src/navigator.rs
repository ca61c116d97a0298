use std::sync::{Mutex, PoisonError};

use modq_engine::Navigator;
use modq_logging::modq_debug;

/// Keeps the query string a browser would show in its address bar.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Mutex<String>,
}

impl TerminalNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            current: Mutex::new(initial.trim_start_matches('?').to_string()),
        }
    }

    pub fn current(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for TerminalNavigator {
    fn replace_query(&self, query: &str) {
        modq_debug!("Location query -> '{}'", query);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = query.to_string();
    }
}
