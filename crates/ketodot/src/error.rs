use ketodot_core::{ColorError, DocumentError};

use crate::config::ConfigError;
use crate::input::InputError;
use crate::output::OutputError;
use crate::watch::WatchError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("could not decode {file}:{}\n  {}\n\n{}", .error.line, .error.text, .error.source)]
    Decode { file: String, error: DocumentError },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Watch(#[from] WatchError),
}
