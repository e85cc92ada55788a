use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigParserError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("config file {path:?} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },
}

pub type ConfigParserResult<T> = core::result::Result<T, ConfigParserError>;
