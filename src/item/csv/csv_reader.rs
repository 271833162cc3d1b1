use std::{cell::RefCell, fs::File, io::Read, path::Path, str};

use log::debug;

use crate::{
    core::item::{RowReader, RowReaderResult},
    error::CsvError,
    item::csv::tokenizer::Tokenizer,
};

const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// A CSV row source that implements the [`RowReader`] trait.
///
/// Wraps any input implementing `Read` and exposes its content as a
/// pull-based sequence of rows. Input is consumed chunk by chunk: each `read`
/// call first drains rows the tokenizer already completed, and only when none
/// are left pulls further chunks from the input, so no more than one chunk's
/// worth of rows is ever buffered ahead of the consumer.
///
/// Bytes are decoded as UTF-8 incrementally; a multi-byte sequence cut by a
/// chunk boundary is carried into the next chunk. A leading byte-order mark
/// is stripped and never surfaces in the first field.
///
/// The input resource is released (dropped) exactly once: on exhaustion, on
/// the first IO or decode failure, or when the reader itself is dropped.
///
/// # Examples
///
/// ```
/// use csv_stream_rs::core::item::RowReader;
/// use csv_stream_rs::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// let data = "city,country\r\nBoston,United States\r\n";
/// let reader = CsvRowReaderBuilder::new().from_reader(data.as_bytes());
///
/// assert_eq!(reader.read().unwrap().unwrap(), ["city", "country"]);
/// assert_eq!(reader.read().unwrap().unwrap(), ["Boston", "United States"]);
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvRowReader<R> {
    /// Uses `RefCell` for interior mutability so the pull loop can advance
    /// while the `read` signature stays compatible with the `RowReader`
    /// trait.
    source: RefCell<Source<R>>,
}

struct Source<R> {
    /// `None` once the input has been released.
    input: Option<R>,
    tokenizer: Tokenizer,
    /// Reusable read buffer, `chunk_size` bytes.
    chunk: Vec<u8>,
    /// Bytes not yet decoded: at most the 3-byte tail of an incomplete UTF-8
    /// sequence survives between chunks.
    carry: Vec<u8>,
    done: bool,
}

impl<R: Read> RowReader for CsvRowReader<R> {
    /// Returns the next row of the input.
    ///
    /// Reads just enough additional chunks to complete one row or detect end
    /// of input. After the sequence ends, by exhaustion or failure, every
    /// further call returns `Ok(None)`.
    fn read(&self) -> RowReaderResult {
        let mut source = self.source.borrow_mut();
        loop {
            if let Some(row) = source.tokenizer.next_row() {
                return Ok(Some(row));
            }
            if source.done {
                return Ok(None);
            }
            source.advance()?;
        }
    }
}

impl<R: Read> Source<R> {
    /// Pulls one chunk from the input and runs it through the tokenizer.
    fn advance(&mut self) -> Result<(), CsvError> {
        let Some(input) = self.input.as_mut() else {
            self.done = true;
            return Ok(());
        };
        match input.read(&mut self.chunk) {
            Ok(0) => {
                if !self.carry.is_empty() {
                    self.release();
                    return Err(CsvError::Decode(
                        "incomplete utf-8 sequence at end of input".to_string(),
                    ));
                }
                self.tokenizer.finish();
                self.release();
                Ok(())
            }
            Ok(len) => self.decode(len),
            Err(error) => {
                self.release();
                Err(CsvError::Io(error.to_string()))
            }
        }
    }

    /// Decodes the first `len` bytes of the chunk buffer, prepending bytes
    /// carried over from the previous chunk, and feeds the tokenizer.
    fn decode(&mut self, len: usize) -> Result<(), CsvError> {
        self.carry.extend_from_slice(&self.chunk[..len]);
        match str::from_utf8(&self.carry) {
            Ok(text) => {
                self.tokenizer.feed(text);
                self.carry.clear();
                Ok(())
            }
            Err(error) if error.error_len().is_some() => {
                self.release();
                Err(CsvError::Decode(error.to_string()))
            }
            Err(error) => {
                // Incomplete sequence at the chunk boundary: decode up to it
                // and keep the tail for the next chunk.
                let valid = error.valid_up_to();
                let text = str::from_utf8(&self.carry[..valid])
                    .map_err(|error| CsvError::Decode(error.to_string()))?;
                self.tokenizer.feed(text);
                self.carry.drain(..valid);
                Ok(())
            }
        }
    }

    fn release(&mut self) {
        if self.input.take().is_some() {
            debug!("csv row source released");
        }
        self.done = true;
    }
}

/// A builder for configuring CSV row reading.
///
/// The delimiter and quote character are fixed (comma and double quote); the
/// only knob is the size of the chunks pulled from the input.
pub struct CsvRowReaderBuilder {
    chunk_size: usize,
}

impl Default for CsvRowReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowReaderBuilder {
    pub fn new() -> Self {
        CsvRowReaderBuilder {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the input chunk size in bytes.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        // a zero-sized buffer would read as end of input
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Creates a `CsvRowReader` from a reader.
    pub fn from_reader<R: Read>(self, rdr: R) -> CsvRowReader<R> {
        CsvRowReader {
            source: RefCell::new(Source {
                input: Some(rdr),
                tokenizer: Tokenizer::new(),
                chunk: vec![0; self.chunk_size],
                carry: Vec::new(),
                done: false,
            }),
        }
    }

    /// Creates a `CsvRowReader` from a file path.
    ///
    /// # Panics
    /// Panics if the file cannot be opened: opening is an initialization
    /// step, so we fail fast instead of returning an error. Failures while
    /// reading are returned from `read` as [`CsvError::Io`].
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> CsvRowReader<File> {
        let file = File::open(path).unwrap();
        self.from_reader(file)
    }
}
