use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] core_runtime::Error),

    #[error("Provider error: {0}")]
    Provider(#[from] provider_youtube::ProviderError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
