// Domain layer: fare models and the preference storage port. No I/O here.

pub mod model;
pub mod ports;
