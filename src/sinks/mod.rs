//! Output sinks: the shared console stream and per-logger rotating files

pub mod console;
pub mod rotating_file;

pub use console::ConsoleSink;
pub use rotating_file::RotatingFileWriter;
