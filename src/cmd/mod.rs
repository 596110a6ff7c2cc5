pub mod calc;
pub mod config;
pub mod init;
pub mod meal;
pub mod plan;
pub mod status;
