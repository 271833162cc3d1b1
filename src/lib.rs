#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>csv-stream-rs</h1>
   <h3>A streaming CSV toolkit: lenient tokenizer, encoder and row pipelines</h3>
 </div>

 # csv-stream-rs

 `csv-stream-rs` converts between tabular data (ordered rows of text fields)
 and CSV text, streaming in both directions so arbitrarily large inputs and
 outputs never need to reside fully in memory. At its heart sits a lenient,
 character-by-character tokenizer with a fixed transition policy for
 adversarial input (unescaped quotes, embedded delimiters and newlines,
 sparse rows, byte-order marks, mixed line endings), paired with an encoder
 that always produces correctly escaped, CRLF-terminated lines.

 ## Core Concepts

 Understanding these core components will help you get started:

 - **Row:** an ordered, non-empty sequence of text fields (`Vec<String>`).
   Rows of the same table may have different field counts.
 - **RowReader:** a pull-based source of rows, one at a time.
 - **RowWriter:** a push-based sink of rows, one at a time, in order.
 - **RowTransformer:** a `RowReader` that maps every row of an inner source
   through a closure, with optional header passthrough and raw-text output.
 - **Step:** the driver that pumps a reader into a writer and reports counts,
   timing and status.

 ## Features

 The crate is modular, allowing you to enable only the features you need:

 | **Feature** | **Description**                                        |
 |-------------|--------------------------------------------------------|
 | logger      | Enables a logger `RowWriter`, useful for debugging     |
 | full        | Enables all available features                         |

 ## Getting Started

```rust
use csv_stream_rs::{
    core::{
        step::{StepBuilder, StepStatus},
        transform::{MapOutput, RowTransformer, TransformConfig},
    },
    item::csv::{csv_reader::CsvRowReaderBuilder, csv_writer::CsvRowWriterBuilder},
};

let csv = "year,make,model\r\n1948,Porsche,356\r\n1967,Ford,Mustang\r\n";

let mut buffer = Vec::new();
{
    let reader = CsvRowReaderBuilder::new().from_reader(csv.as_bytes());

    let transformer = RowTransformer::new(
        reader,
        |row, _index| {
            let fields: Vec<String> = row.iter().map(|f| f.to_uppercase()).collect();
            MapOutput::Fields(fields)
        },
        TransformConfig::new(),
    );

    let writer = CsvRowWriterBuilder::new().from_writer(&mut buffer);

    let step = StepBuilder::new()
        .name("uppercase")
        .reader(&transformer)
        .writer(&writer)
        .build();

    let result = step.execute();
    assert_eq!(result.status, StepStatus::Success);
    assert_eq!(result.write_count, 3);
}

let output = String::from_utf8(buffer).unwrap();
assert_eq!(
    output,
    "year,make,model\r\n1948,PORSCHE,356\r\n1967,FORD,MUSTANG\r\n"
);
```

 ## Error model

 Failures of the underlying input or output ([`CsvError::Io`]) and invalid
 character data ([`CsvError::Decode`]) are fatal to the pipeline instance:
 the resource is released, the sequence ends, and already-produced rows are
 not rolled back. The tokenizer itself never fails; malformed quoting maps
 to a deterministic row sequence instead of an error.
 */

/// Core module: row model, step runner, transform stage
pub mod core;

/// Error types for row streaming operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Row sources and sinks (CSV reader and writer, logger)
pub mod item;
