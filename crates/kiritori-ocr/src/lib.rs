mod tesseract;
mod tsv;

pub use tesseract::TesseractRecognizer;
