#[cfg(feature = "lambda")]
pub mod lambda;
#[cfg(feature = "server")]
pub mod server;
pub mod toml_config;

#[cfg(feature = "lambda")]
pub use lambda::LambdaConfig;
#[cfg(feature = "server")]
pub use server::ServiceConfig;
pub use toml_config::FileConfig;
