/// This module provides the CSV row source and sink plus the
/// tokenizer/encoder pair they are built on.
pub mod csv;

#[cfg(feature = "logger")]
/// This module provides a logger row sink, useful for debugging purposes.
pub mod logger;
