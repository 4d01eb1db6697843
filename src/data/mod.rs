pub mod csv;

pub use self::csv::{parse_rows, read_rows, split_target, CsvParseError};
