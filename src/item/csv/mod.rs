//! CSV support for reading and writing tabular data as streams of rows.
//!
//! The module is built around two pure pieces and two adapters:
//!
//! 1. **Tokenizer**: a lenient, stateful character-by-character parser that
//!    reconstructs rows from chunked input. It has no reject states; common
//!    malformed variants (unescaped quotes, lone carriage returns, sparse
//!    rows, mixed line endings) map to a deterministic row sequence instead
//!    of an error.
//!
//! 2. **Encoder**: the inverse, serializing one row as a correctly escaped,
//!    CRLF-terminated CSV line.
//!
//! 3. **CsvRowReader**: adapts any `Read` input to the tokenizer and exposes
//!    a pull-based row sequence, stripping a leading byte-order mark.
//!
//! 4. **CsvRowWriter**: adapts the encoder to any `Write` output, accepting
//!    rows in order and releasing the output exactly once.
//!
//! Both adapters implement the core `RowReader`/`RowWriter` traits, so they
//! combine with the step runner and the transform stage.
//!
//! # Examples
//!
//! ## Reading rows
//!
//! ```
//! use csv_stream_rs::core::item::RowReader;
//! use csv_stream_rs::item::csv::csv_reader::CsvRowReaderBuilder;
//!
//! let csv_data = "\
//! city,country,pop\r
//! Boston,United States,4628910\r
//! ";
//!
//! let reader = CsvRowReaderBuilder::new().from_reader(csv_data.as_bytes());
//!
//! let mut rows = Vec::new();
//! while let Some(row) = reader.read().unwrap() {
//!     rows.push(row);
//! }
//!
//! assert_eq!(rows, [
//!     ["city", "country", "pop"],
//!     ["Boston", "United States", "4628910"],
//! ]);
//! ```
//!
//! ## Writing rows
//!
//! ```
//! use csv_stream_rs::core::item::RowWriter;
//! use csv_stream_rs::item::csv::csv_writer::CsvRowWriterBuilder;
//!
//! let mut buffer = Vec::new();
//! {
//!     let writer = CsvRowWriterBuilder::new().from_writer(&mut buffer);
//!     writer.write(&vec!["city".to_string(), "pop".to_string()]).unwrap();
//!     writer.write(&vec!["Boston".to_string(), "4628910".to_string()]).unwrap();
//!     writer.close().unwrap();
//! } // writer is dropped here, releasing the borrow
//!
//! let csv_output = String::from_utf8(buffer).unwrap();
//! assert_eq!(csv_output, "city,pop\r\nBoston,4628910\r\n");
//! ```

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// A module providing facilities for reading CSV rows.
pub mod csv_reader;

/// A module providing facilities for writing CSV rows.
pub mod csv_writer;

/// A module providing the row-to-line encoder.
pub mod encoder;

/// A module providing the streaming CSV tokenizer.
pub mod tokenizer;
