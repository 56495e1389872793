mod generation;
pub use generation::*;

pub mod logging;
pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};

mod secrets;
pub use secrets::*;

mod vec2;
pub use vec2::*;

// downstream crates log through base::log::*
pub use log;
