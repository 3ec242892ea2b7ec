pub mod interface;
pub mod client;

pub use interface::{SpeechSynthesizer, SynthesisError};
pub use client::CloudSynthesisClient;
