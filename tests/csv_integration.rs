use std::fs;

use anyhow::Result;

use csv_stream_rs::{
    core::{
        item::RowReader,
        step::{StepBuilder, StepStatus},
        transform::{MapOutput, RowTransformer, TransformConfig},
    },
    item::csv::{csv_reader::CsvRowReaderBuilder, csv_writer::CsvRowWriterBuilder},
};

#[test]
fn transform_csv_file_to_csv_file_without_error() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let csv_content =
        "id,name,price\r\nP001,\"Wireless, Headphones\",79.99\r\nP002,USB-C Cable,12.99\r\n";

    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("products.csv");
    let output_path = dir.path().join("products_upper.csv");
    fs::write(&input_path, csv_content)?;

    {
        let reader = CsvRowReaderBuilder::new().from_path(&input_path);
        let transformer = RowTransformer::new(
            reader,
            |row, _index| {
                let mut fields = row.clone();
                fields[1] = fields[1].to_uppercase();
                MapOutput::Fields(fields)
            },
            TransformConfig::new(),
        );
        let writer = CsvRowWriterBuilder::new().from_path(&output_path);

        let step = StepBuilder::new()
            .name("uppercase-names")
            .reader(&transformer)
            .writer(&writer)
            .build();
        let result = step.execute();

        assert_eq!(result.status, StepStatus::Success);
        assert_eq!(result.read_count, 3);
        assert_eq!(result.write_count, 3);
    }

    let written = fs::read_to_string(&output_path)?;
    assert_eq!(
        written,
        "id,name,price\r\nP001,\"WIRELESS, HEADPHONES\",79.99\r\nP002,USB-C CABLE,12.99\r\n"
    );
    Ok(())
}

#[test]
fn bom_and_mixed_line_endings_normalize_on_a_file_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("bom.csv");
    let output_path = dir.path().join("bom_out.csv");
    fs::write(&input_path, "\u{feff}column1,column2\nab,cd\r\nef,gh")?;

    {
        let reader = CsvRowReaderBuilder::new().from_path(&input_path);
        let writer = CsvRowWriterBuilder::new().from_path(&output_path);
        let step = StepBuilder::new().reader(&reader).writer(&writer).build();
        assert_eq!(step.execute().status, StepStatus::Success);
    }

    // BOM stripped, terminators written back as CRLF
    assert_eq!(
        fs::read_to_string(&output_path)?,
        "column1,column2\r\nab,cd\r\nef,gh\r\n"
    );
    Ok(())
}

#[test]
fn sparse_tables_keep_per_row_field_counts() {
    let reader = CsvRowReaderBuilder::new().from_reader("a,b,c\r\n\r\na,b\r\n".as_bytes());

    let mut rows = Vec::new();
    while let Some(row) = reader.read().unwrap() {
        rows.push(row);
    }

    assert_eq!(rows, vec![vec!["a", "b", "c"], vec![""], vec!["a", "b"]]);
}

#[test]
fn quoted_terminators_survive_the_round_trip() -> Result<()> {
    let text = "\"line1\r\nline2\",x\r\n";
    let reader = CsvRowReaderBuilder::new().from_reader(text.as_bytes());

    let mut buffer = Vec::new();
    {
        let writer = CsvRowWriterBuilder::new().from_writer(&mut buffer);
        let step = StepBuilder::new().reader(&reader).writer(&writer).build();
        assert_eq!(step.execute().status, StepStatus::Success);
    }

    assert_eq!(String::from_utf8(buffer)?, text);
    Ok(())
}

#[test]
fn header_row_is_never_given_to_the_mapping_closure() {
    let reader =
        CsvRowReaderBuilder::new().from_reader("column1,column2\r\nab,cd\r\n".as_bytes());
    let transformer = RowTransformer::new(
        reader,
        |_row, _index| MapOutput::from(vec!["mangled"]),
        TransformConfig::new(),
    );

    assert_eq!(
        transformer.read().unwrap().unwrap(),
        ["column1", "column2"]
    );
    assert_eq!(transformer.read().unwrap().unwrap(), ["mangled"]);
    assert!(transformer.read().unwrap().is_none());
}

#[test]
fn raw_output_transform_reshapes_rows() -> Result<()> {
    let reader = CsvRowReaderBuilder::new().from_reader("a-1\r\nb-2\r\n".as_bytes());
    let transformer = RowTransformer::new(
        reader,
        |row, _index| MapOutput::Raw(row[0].replace('-', ",")),
        TransformConfig::new().include_headers(true).raw_output(true),
    );

    let mut buffer = Vec::new();
    {
        let writer = CsvRowWriterBuilder::new()
            .headers(vec!["key", "value"])
            .from_writer(&mut buffer);
        let step = StepBuilder::new()
            .name("split-pairs")
            .reader(&transformer)
            .writer(&writer)
            .build();
        assert_eq!(step.execute().status, StepStatus::Success);
    }

    assert_eq!(String::from_utf8(buffer)?, "key,value\r\na,1\r\nb,2\r\n");
    Ok(())
}
