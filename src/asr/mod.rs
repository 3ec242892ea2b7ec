pub mod interface;
pub mod client;

pub use interface::{SpeechToText, TranscriptionError};
pub use client::CloudSpeechClient;
