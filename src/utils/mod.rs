pub mod fs;

pub use fs::{read_file_to_string, write_file};
