use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NotificationError {
    /// `show` ran outside any `provide_notifications` frame for its content type.
    #[error("no NotificationController provided for this content type; wrap the caller in provide_notifications")]
    MissingController,
}
