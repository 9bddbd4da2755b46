pub mod csv_reader;
pub mod xlsx_reader;

pub use csv_reader::CsvReader;
