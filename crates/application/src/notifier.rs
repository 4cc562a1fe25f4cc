/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation completed.
    Success,
    /// Operation failed.
    Error,
    /// Neutral information.
    Info,
}

impl NoticeLevel {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// User-facing notice emitted alongside operation outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    level: NoticeLevel,
    message: String,
}

impl Notice {
    /// Creates a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Creates an info notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Returns the notice severity.
    #[must_use]
    pub fn level(&self) -> NoticeLevel {
        self.level
    }

    /// Returns the notice message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Delivery port for user-facing notices.
///
/// Delivery is fire-and-forget: implementations must not block and have no
/// way to report failure back to the caller.
pub trait Notifier: Send + Sync {
    /// Delivers a single notice.
    fn notify(&self, notice: Notice);
}
