pub mod pipeline;
pub mod ports;
