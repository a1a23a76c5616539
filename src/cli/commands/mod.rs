pub mod export;
pub mod helper;
pub mod init;
pub mod schema;
pub mod validate;
