use thiserror::Error;

#[derive(Error, Debug)]
/// Stream error
pub enum CsvError {
    /// The underlying input or output reported an error. The resource has
    /// already been released when this is returned; the pipeline instance
    /// cannot be resumed.
    #[error("io failure: {0}")]
    Io(String),

    /// The input produced invalid character data.
    #[error("decode failure: {0}")]
    Decode(String),

    /// A row was offered to a sink that has already failed or been closed.
    #[error("sink is closed")]
    Closed,
}
