pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "server")]
pub use config::ServiceConfig;

#[cfg(feature = "lambda")]
pub use config::LambdaConfig;

pub use crate::adapters::openai::OpenAiClient;
pub use crate::core::{adapter::NameTransliterationAdapter, handler::ConvertHandler};
pub use crate::utils::error::{ConvertError, Result};
