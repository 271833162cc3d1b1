use log::info;

use csv_stream_rs::{
    core::step::StepBuilder,
    item::{csv::csv_reader::CsvRowReaderBuilder, logger::LoggerRowWriter},
};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let csv = "year,make,model\r\n1948,Porsche,356\r\n1967,Ford,Mustang\r\n";

    let reader = CsvRowReaderBuilder::new().from_reader(csv.as_bytes());
    let writer = LoggerRowWriter::new();

    let step = StepBuilder::new()
        .name("log-rows")
        .reader(&reader)
        .writer(&writer)
        .build();

    let result = step.execute();
    info!("logged {} rows", result.write_count);
}
