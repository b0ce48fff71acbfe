// Domain layer: records, field decoding and the loader port.

pub mod lenient;
pub mod model;
pub mod ports;
