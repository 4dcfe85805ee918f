use std::path::Path;

/// Plays the end-of-session notification.
///
/// Implementations must swallow their own failures: a broken bell never stops
/// a countdown.
pub trait Notifier: Send + Sync {
    fn notify(&self, path: &Path);
}

/// Notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _path: &Path) {}
}
