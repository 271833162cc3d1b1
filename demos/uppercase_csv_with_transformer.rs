use csv_stream_rs::{
    core::{
        step::{StepBuilder, StepStatus},
        transform::{MapOutput, RowTransformer, TransformConfig},
    },
    item::csv::{csv_reader::CsvRowReaderBuilder, csv_writer::CsvRowWriterBuilder},
};

fn main() {
    env_logger::init();

    let csv = "year,make,model,description\r\n\
               1948,Porsche,356,Luxury sports car\r\n\
               1967,Ford,Mustang fastback 1967,American car\r\n";

    let reader = CsvRowReaderBuilder::new().from_reader(csv.as_bytes());

    let transformer = RowTransformer::new(
        reader,
        |row, _index| {
            let fields: Vec<String> = row.iter().map(|field| field.to_uppercase()).collect();
            MapOutput::Fields(fields)
        },
        TransformConfig::new(),
    );

    let mut buffer = Vec::new();
    {
        let writer = CsvRowWriterBuilder::new().from_writer(&mut buffer);

        let step = StepBuilder::new()
            .name("uppercase")
            .reader(&transformer)
            .writer(&writer)
            .build();

        let result = step.execute();
        assert!(result.status == StepStatus::Success);
    }

    print!("{}", String::from_utf8(buffer).expect("output is utf-8"));
}
