use std::cell::{Cell, RefCell};

use crate::{
    core::item::{Row, RowReader, RowReaderResult},
    item::csv::tokenizer::Tokenizer,
};

/// Options for a [`RowTransformer`].
///
/// Both options default to off.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformConfig {
    include_headers: bool,
    raw_output: bool,
}

impl TransformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the first row is handed to the mapping closure.
    ///
    /// When off (the default) the first row is treated as a header: it is
    /// passed through to the output untouched and the closure never sees it.
    pub fn include_headers(mut self, yes: bool) -> Self {
        self.include_headers = yes;
        self
    }

    /// Sets whether mapped text is parsed back into fields.
    ///
    /// When on, a [`MapOutput::Raw`] value returned by the closure is treated
    /// as encoded CSV text for one row and re-tokenized into fields. When off
    /// the closure's return value is used directly.
    pub fn raw_output(mut self, yes: bool) -> Self {
        self.raw_output = yes;
        self
    }
}

/// Value returned by a row mapping closure.
pub enum MapOutput {
    /// A field sequence, used as the output row directly.
    Fields(Row),
    /// Text standing for one row. Parsed back into fields when the stage
    /// runs with [`TransformConfig::raw_output`]; kept as a single field
    /// otherwise.
    Raw(String),
}

impl From<Row> for MapOutput {
    fn from(fields: Row) -> Self {
        MapOutput::Fields(fields)
    }
}

impl From<Vec<&str>> for MapOutput {
    fn from(fields: Vec<&str>) -> Self {
        MapOutput::Fields(fields.into_iter().map(str::to_string).collect())
    }
}

impl From<String> for MapOutput {
    fn from(text: String) -> Self {
        MapOutput::Raw(text)
    }
}

impl From<&str> for MapOutput {
    fn from(text: &str) -> Self {
        MapOutput::Raw(text.to_string())
    }
}

/// A row source that maps every row of an inner source through a closure.
///
/// Produces exactly one output row per input row, in input order. The
/// closure receives the row and its zero-based index in the source, so
/// callers can special-case positions without keeping a counter of their
/// own. The mapped field count is free to grow or shrink per row; nothing
/// ties field counts across rows.
///
/// Errors from the inner source propagate unchanged.
///
/// # Examples
///
/// ```
/// use csv_stream_rs::core::item::RowReader;
/// use csv_stream_rs::core::transform::{MapOutput, RowTransformer, TransformConfig};
/// use csv_stream_rs::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// let reader = CsvRowReaderBuilder::new().from_reader("name\r\nporsche\r\n".as_bytes());
/// let transformer = RowTransformer::new(
///     reader,
///     |row, _index| MapOutput::Fields(row.iter().map(|f| f.to_uppercase()).collect()),
///     TransformConfig::new(),
/// );
///
/// // the header row is passed through untouched
/// assert_eq!(transformer.read().unwrap().unwrap(), ["name"]);
/// assert_eq!(transformer.read().unwrap().unwrap(), ["PORSCHE"]);
/// ```
pub struct RowTransformer<S, F> {
    source: S,
    /// `RefCell` so the `FnMut` closure can run behind the trait's `&self`.
    map_fn: RefCell<F>,
    config: TransformConfig,
    next_index: Cell<usize>,
}

impl<S, F> RowTransformer<S, F>
where
    S: RowReader,
    F: FnMut(&Row, usize) -> MapOutput,
{
    pub fn new(source: S, map_fn: F, config: TransformConfig) -> Self {
        RowTransformer {
            source,
            map_fn: RefCell::new(map_fn),
            config,
            next_index: Cell::new(0),
        }
    }

    fn apply(&self, output: MapOutput) -> Row {
        match output {
            MapOutput::Fields(fields) => fields,
            MapOutput::Raw(text) if self.config.raw_output => {
                // the mapped text stands for exactly one row
                Tokenizer::parse(&text)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| vec![String::new()])
            }
            MapOutput::Raw(text) => vec![text],
        }
    }
}

impl<S, F> RowReader for RowTransformer<S, F>
where
    S: RowReader,
    F: FnMut(&Row, usize) -> MapOutput,
{
    fn read(&self) -> RowReaderResult {
        let Some(row) = self.source.read()? else {
            return Ok(None);
        };
        let index = self.next_index.get();
        self.next_index.set(index + 1);
        if index == 0 && !self.config.include_headers {
            return Ok(Some(row));
        }
        let mut map_fn = self.map_fn.borrow_mut();
        let output = (*map_fn)(&row, index);
        Ok(Some(self.apply(output)))
    }
}
