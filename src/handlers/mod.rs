pub mod process_data;

pub use process_data::process_data_handler;
