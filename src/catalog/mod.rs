pub mod extractor;
pub mod selector;
