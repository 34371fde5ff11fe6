//! Local price files in, CSV tables out.
//!
//! The analytics engine never sees a file; this crate is the boundary that
//! turns `<ASSET>.csv` files into validated `PriceSeries` and writes derived
//! tables back to disk.

pub mod error;
pub mod export;
pub mod source;

pub use error::DataError;
pub use export::{export_file_name, merged_file_name, write_merged_csv, write_series_csv};
pub use source::{CsvPriceSource, PriceSource, read_series};
