//! Console notifier for development runs.

use ledgerdesk_application::{Notice, NoticeLevel, Notifier};
use tracing::{info, warn};

/// Notifier that writes notices to the tracing output.
#[derive(Debug, Clone)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a console notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level() {
            NoticeLevel::Error => warn!(level = notice.level().as_str(), "{}", notice.message()),
            NoticeLevel::Success | NoticeLevel::Info => {
                info!(level = notice.level().as_str(), "{}", notice.message());
            }
        }
    }
}
