use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("moderation failed: {0}")]
    Moderation(#[from] ModerationError),
    #[error("admin request rejected: {0}")]
    Admin(#[from] AdminError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Failures surfaced from the host while evaluating a save.
///
/// Matching itself never fails: missing tags or an empty forbidden list are
/// "no match", not errors.
#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("host error: {0}")]
    Host(#[source] anyhow::Error),
    #[error("options error: {0}")]
    Options(#[source] anyhow::Error),
}

/// Fatal rejections of an administrator settings update.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Unauthorized user")]
    Unauthorized,
    #[error("Nonce must be set")]
    MissingNonce,
    #[error("Invalid nonce")]
    InvalidNonce,
    #[error("failed to store options: {0}")]
    Store(#[source] anyhow::Error),
}
