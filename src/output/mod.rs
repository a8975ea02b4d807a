//! Writing tables and raw rows back to CSV

mod csv;

pub use self::csv::{
    save_csv_by_data, save_csv_by_data_with, save_csv_by_table, save_csv_by_table_with,
};
