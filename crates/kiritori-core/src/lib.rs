pub mod conditioner;
pub mod correct;
pub mod engine;
pub mod error;
pub mod recognizer;
pub mod reconstruct;
pub mod repass;
pub mod score;
pub mod script;

pub use correct::Corrector;
pub use engine::OcrEngine;
pub use error::Error;
pub use recognizer::{RecognizeOptions, Recognizer};
