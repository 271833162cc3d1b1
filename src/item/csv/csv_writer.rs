use std::{
    cell::RefCell,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::{
    core::item::{Row, RowWriter, RowWriterResult},
    error::CsvError,
    item::csv::encoder::encode,
};

/// A CSV row sink that implements the [`RowWriter`] trait.
///
/// Accepts rows one at a time, in order, encodes each as one CSV line and
/// writes it to the underlying output. The output resource is released
/// exactly once: on [`close`](RowWriter::close), on the first write failure,
/// or when the sink itself is dropped. After a failure or close, further rows
/// are refused with [`CsvError::Closed`].
///
/// # Examples
///
/// ```
/// use csv_stream_rs::core::item::RowWriter;
/// use csv_stream_rs::item::csv::csv_writer::CsvRowWriterBuilder;
///
/// let writer = CsvRowWriterBuilder::new().from_writer(Vec::new());
/// writer.write(&vec!["a,bc".to_string(), "12,3".to_string()]).unwrap();
/// writer.write(&vec!["plain".to_string(), String::new()]).unwrap();
///
/// let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(data, "\"a,bc\",\"12,3\"\r\nplain,\r\n");
/// ```
pub struct CsvRowWriter<W: Write> {
    sink: RefCell<Sink<W>>,
}

struct Sink<W: Write> {
    /// `None` once the output has been released.
    output: Option<W>,
    /// Header row written on `open`, at most once.
    headers: Option<Row>,
}

impl<W: Write> RowWriter for CsvRowWriter<W> {
    /// Writes the configured header row, if any.
    fn open(&self) -> RowWriterResult {
        let mut sink = self.sink.borrow_mut();
        match sink.headers.take() {
            Some(headers) => sink.write_row(&headers),
            None => Ok(()),
        }
    }

    fn write(&self, row: &Row) -> RowWriterResult {
        self.sink.borrow_mut().write_row(row)
    }

    /// Flushes the underlying output. A no-op once the output is released.
    fn flush(&self) -> RowWriterResult {
        self.sink.borrow_mut().flush()
    }

    /// Flushes and releases the underlying output, exactly once.
    ///
    /// Idempotent: closing an already closed or failed sink is a no-op.
    fn close(&self) -> RowWriterResult {
        self.sink.borrow_mut().close()
    }
}

impl<W: Write> CsvRowWriter<W> {
    /// Flushes and hands back the underlying output.
    ///
    /// Fails with [`CsvError::Closed`] if the output was already released.
    pub fn into_inner(self) -> Result<W, CsvError> {
        let mut sink = self.sink.into_inner();
        let Some(mut output) = sink.output.take() else {
            return Err(CsvError::Closed);
        };
        match output.flush() {
            Ok(()) => Ok(output),
            Err(error) => Err(CsvError::Io(error.to_string())),
        }
    }
}

impl<W: Write> Sink<W> {
    fn write_row(&mut self, row: &Row) -> RowWriterResult {
        let Some(output) = self.output.as_mut() else {
            return Err(CsvError::Closed);
        };
        let line = encode(row);
        if let Err(error) = output.write_all(line.as_bytes()) {
            self.release();
            return Err(CsvError::Io(error.to_string()));
        }
        Ok(())
    }

    fn flush(&mut self) -> RowWriterResult {
        let Some(output) = self.output.as_mut() else {
            return Ok(());
        };
        if let Err(error) = output.flush() {
            self.release();
            return Err(CsvError::Io(error.to_string()));
        }
        Ok(())
    }

    fn close(&mut self) -> RowWriterResult {
        let Some(mut output) = self.output.take() else {
            return Ok(());
        };
        debug!("csv row sink released");
        // the output itself is dropped here whether or not the flush worked
        if let Err(error) = output.flush() {
            return Err(CsvError::Io(error.to_string()));
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.output.take().is_some() {
            debug!("csv row sink released");
        }
    }
}

/// A builder for configuring CSV row writing.
///
/// Rows are always joined with commas and terminated with CRLF; the only
/// option is a header row emitted when the sink is opened.
#[derive(Default)]
pub struct CsvRowWriterBuilder {
    headers: Option<Row>,
}

impl CsvRowWriterBuilder {
    pub fn new() -> Self {
        CsvRowWriterBuilder { headers: None }
    }

    /// Sets a header row to write when the sink is opened.
    pub fn headers<S: Into<String>>(mut self, headers: Vec<S>) -> Self {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Creates a `CsvRowWriter` from a writer.
    pub fn from_writer<W: Write>(self, wtr: W) -> CsvRowWriter<W> {
        CsvRowWriter {
            sink: RefCell::new(Sink {
                output: Some(wtr),
                headers: self.headers,
            }),
        }
    }

    /// Creates a buffered `CsvRowWriter` writing to a file path.
    ///
    /// # Panics
    /// Panics if the file cannot be created: creating it is an
    /// initialization step, so we fail fast instead of returning an error.
    /// Failures while writing are returned from `write` as
    /// [`CsvError::Io`].
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> CsvRowWriter<BufWriter<File>> {
        let file = File::create(path).unwrap();
        self.from_writer(BufWriter::new(file))
    }
}
