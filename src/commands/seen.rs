//! Seen command: shows the persisted seen-set.

use crate::config::Config;
use crate::format::Formatter;
use crate::store::SeenStore;

/// Prints the URLs already notified.
pub struct SeenCommand {
    config: Config,
}

impl SeenCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> String {
        let seen = SeenStore::new(&self.config.state_file).load();
        Formatter::new(self.config.format).format_seen(&seen)
    }
}
