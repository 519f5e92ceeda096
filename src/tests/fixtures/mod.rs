pub mod gateway;
pub mod models;
pub mod spans;
