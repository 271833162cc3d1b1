use std::cell::Cell;

use log::info;

use crate::core::item::{Row, RowWriter, RowWriterResult};

/// A row sink that logs rows instead of persisting them.
///
/// Every row is reported through the `log` facade with its position in the
/// stream, then dropped. Useful as the tail of a pipeline while debugging.
#[derive(Default)]
pub struct LoggerRowWriter {
    count: Cell<usize>,
}

impl LoggerRowWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowWriter for LoggerRowWriter {
    fn write(&self, row: &Row) -> RowWriterResult {
        let index = self.count.get();
        self.count.set(index + 1);
        info!("Row {}:{:?}", index, row);
        Ok(())
    }

    fn flush(&self) -> RowWriterResult {
        Ok(())
    }
}
