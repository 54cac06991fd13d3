pub mod check;
mod command_result;
pub mod fix;
pub mod helper;
pub mod init;
pub mod rules;

pub use command_result::*;
