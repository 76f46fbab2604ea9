pub mod port;
pub mod ports;
