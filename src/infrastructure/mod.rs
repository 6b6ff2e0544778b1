pub mod logging;
pub mod storage;
pub mod user;
