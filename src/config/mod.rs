pub mod args;
mod r#impl;
mod structs;

pub use args::Args;
pub use r#impl::{get_config, init_config, set_config};
pub use structs::*;
