pub mod sentence_splitter;

pub use sentence_splitter::split_sentences;
