//! Application metadata constants

pub const NAME: &str = "mimic";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Fine-tune a language model on your chat history and reply in your style";

/// Directory name for mimic data (global under $HOME, or per project)
pub const DATA_DIR: &str = ".mimic";
/// Env file inside DATA_DIR
pub const ENV_FILE: &str = "env";
