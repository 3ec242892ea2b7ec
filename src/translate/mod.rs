pub mod interface;
pub mod client;

pub use interface::{TranslationError, Translator};
pub use client::CloudTranslateClient;
