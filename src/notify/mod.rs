use tracing::warn;

/// Fire-and-forget sink for user-facing error messages. The cart service
/// never consumes a result; displaying the message is someone else's concern.
pub trait Notifier: Send {
    fn notify(&self, message: &str);
}

/// Surfaces messages as structured warnings. The default sink when no UI is
/// attached.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(target: "user_notification", "{}", message);
    }
}
