use std::{
    cell::Cell,
    time::{Duration, Instant},
};

use log::{debug, error, info};
use uuid::Uuid;

use super::{
    build_name,
    item::{RowReader, RowWriter},
};

#[derive(Debug, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Error,
}

/// Outcome of one step execution.
pub struct StepResult {
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    pub status: StepStatus,
    pub read_count: usize,
    pub write_count: usize,
}

/// Pumps every row of a reader into a writer, in order, one row at a time.
///
/// The writer is opened before the first row and closed on every exit path.
/// The first read or write failure aborts the step: there is no skip limit
/// and no partial-row recovery, callers retry by re-running the whole step.
pub struct Step<'a> {
    id: Uuid,
    name: String,
    reader: &'a dyn RowReader,
    writer: &'a dyn RowWriter,
    read_count: Cell<usize>,
    write_count: Cell<usize>,
}

impl Step<'_> {
    pub fn execute(&self) -> StepResult {
        let start = Instant::now();

        info!("Start of step: {}, id: {}", self.name, self.id);

        let mut status = self.pump();

        if let Err(err) = self.writer.close() {
            error!("Cannot close writer: {}", err);
            status = StepStatus::Error;
        }

        info!("End of step: {}, id: {}", self.name, self.id);

        StepResult {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            status,
            read_count: self.read_count.get(),
            write_count: self.write_count.get(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn pump(&self) -> StepStatus {
        if let Err(err) = self.writer.open() {
            error!("Cannot open writer: {}", err);
            return StepStatus::Error;
        }

        loop {
            match self.reader.read() {
                Ok(Some(row)) => {
                    self.read_count.set(self.read_count.get() + 1);
                    if let Err(err) = self.writer.write(&row) {
                        error!("Cannot write row: {}", err);
                        return StepStatus::Error;
                    }
                    self.write_count.set(self.write_count.get() + 1);
                }
                Ok(None) => {
                    // All rows of the reader have been consumed
                    debug!("End of rows");
                    return StepStatus::Success;
                }
                Err(err) => {
                    error!("Cannot read row: {}", err);
                    return StepStatus::Error;
                }
            }
        }
    }
}

#[derive(Default)]
pub struct StepBuilder<'a> {
    name: Option<String>,
    reader: Option<&'a dyn RowReader>,
    writer: Option<&'a dyn RowWriter>,
}

impl<'a> StepBuilder<'a> {
    pub fn new() -> StepBuilder<'a> {
        Self {
            name: None,
            reader: None,
            writer: None,
        }
    }

    /// Sets the name of the step. A random name is generated if not set.
    pub fn name<S: Into<String>>(mut self, name: S) -> StepBuilder<'a> {
        self.name = Some(name.into());
        self
    }

    pub fn reader(mut self, reader: &'a impl RowReader) -> StepBuilder<'a> {
        self.reader = Some(reader);
        self
    }

    pub fn writer(mut self, writer: &'a impl RowWriter) -> StepBuilder<'a> {
        self.writer = Some(writer);
        self
    }

    pub fn build(self) -> Step<'a> {
        Step {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            reader: self.reader.unwrap(),
            writer: self.writer.unwrap(),
            read_count: Cell::new(0),
            write_count: Cell::new(0),
        }
    }
}
