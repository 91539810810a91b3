pub mod assert;
pub mod highlight;
pub mod log_dir;
pub mod utils;

#[cfg(test)]
#[path = "../commands_test.rs"]
mod commands_test;
