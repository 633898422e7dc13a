use std::time::Duration;

use crate::recognition::RecognitionConfig;

/// Silence window after which a listening session stops itself
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(2 * 60);

/// Pause between a natural end of recognition and the restart
pub const RESTART_GRACE: Duration = Duration::from_millis(500);

/// Configuration for a capture session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "kitchen-7f0c...")
    pub session_id: String,

    /// Settings handed to every engine instance
    pub recognition: RecognitionConfig,

    /// Silence window before the session stops itself
    /// Default: 120 seconds
    pub inactivity_timeout: Duration,

    /// Delay before a fresh engine replaces one that ended
    /// Default: 500 ms
    pub restart_grace: Duration,
}

impl SessionConfig {
    /// Default session settings for the given locale
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            recognition: RecognitionConfig {
                locale: locale.into(),
                ..RecognitionConfig::default()
            },
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("kitchen-{}", uuid::Uuid::new_v4()),
            recognition: RecognitionConfig::default(),
            inactivity_timeout: INACTIVITY_TIMEOUT,
            restart_grace: RESTART_GRACE,
        }
    }
}
