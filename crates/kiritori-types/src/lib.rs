pub mod types;

pub use types::{
    BoundingBox, Language, OcrOutput, RecognitionResult, RecognizedWord, SegmentationMode,
};
