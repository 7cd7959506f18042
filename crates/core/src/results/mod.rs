pub mod chunk;
pub mod filter;
pub mod format;
pub mod response;
pub mod service;
