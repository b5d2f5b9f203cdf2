pub mod csv_import;

pub use csv_import::{import_csv, parse_schedule, ImportReport};
