pub mod config;
pub mod console;
pub mod error;
pub mod types;

pub use console::{BufferedConsole, Console, NullConsole};
