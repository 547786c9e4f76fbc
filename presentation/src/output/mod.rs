//! Terminal output

pub mod console;
pub mod image_writer;
pub mod printer;
