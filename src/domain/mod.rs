// Domain layer: value model, ports, and the typed capabilities the built-in modules are made of.

pub mod composition;
pub mod model;
pub mod ports;
pub mod shapes;
pub mod validated;
