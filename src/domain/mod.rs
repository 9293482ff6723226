pub mod document;
pub mod errors;
pub mod mobile;
pub mod order;
pub mod ports;
