pub mod cards;
pub mod chat;
pub mod check;
pub mod convert;
pub mod export;
pub mod import;
pub mod init;
pub mod misc;
