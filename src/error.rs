use crate::provider::error::ProviderError;
use crate::stations::error::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaqiError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Environment variable '{0}' with the API token is not set")]
    MissingToken(&'static str),
}
