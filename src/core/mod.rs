pub mod adapter;
pub mod handler;
pub mod hiragana;
pub mod name;

pub use crate::domain::model::{ApiResponse, NameInput, TransliterationRequest};
pub use crate::domain::ports::{ConfigProvider, TextGenerator};
pub use crate::utils::error::Result;
