use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Series '{asset}' is not in ascending date order at {date}")]
    UnsortedDates { asset: String, date: NaiveDate },

    #[error("Series '{asset}' contains the date {date} more than once")]
    DuplicateDate { asset: String, date: NaiveDate },

    #[error("Series '{asset}' has a non-positive or non-finite close ({close}) on {date}")]
    InvalidClose {
        asset: String,
        date: NaiveDate,
        close: f64,
    },
}
