use crate::error::CsvError;

/// One row of tabular data: an ordered sequence of text fields.
///
/// Rows are independent of each other; two rows of the same table may carry
/// different field counts ("sparse" tables are legal). A row is never empty:
/// even a blank input line parses to one row holding one empty field.
pub type Row = Vec<String>;

/// Result of pulling one row from a source.
///
/// - `Ok(Some(row))` - the next row
/// - `Ok(None)` - the source is exhausted (or was terminated by an earlier
///   failure)
/// - `Err(error)` - the underlying resource failed; it has been released and
///   the sequence ends here
pub type RowReaderResult = Result<Option<Row>, CsvError>;

/// Result of pushing one row into a sink.
pub type RowWriterResult = Result<(), CsvError>;

/// A pull-based source of rows.
///
/// Implementors do no more work per call than is needed to complete one row,
/// so a slow consumer never forces the whole input into memory. Interior
/// mutability (`RefCell`) keeps the signature `&self` while each source stays
/// exclusively owned by one pipeline.
pub trait RowReader {
    /// Returns the next row, or `Ok(None)` once the source is exhausted.
    fn read(&self) -> RowReaderResult;
}

impl<T: RowReader + ?Sized> RowReader for &T {
    fn read(&self) -> RowReaderResult {
        (**self).read()
    }
}

/// A push-based sink of rows.
///
/// Rows are accepted one at a time, in order. After a failed `write` the
/// underlying resource is released and every further row is refused with
/// [`CsvError::Closed`].
pub trait RowWriter {
    fn write(&self, row: &Row) -> RowWriterResult;
    fn flush(&self) -> RowWriterResult;
    fn open(&self) -> RowWriterResult {
        Ok(())
    }
    fn close(&self) -> RowWriterResult {
        Ok(())
    }
}
