pub mod cmd;
pub mod encode;
pub mod error;
