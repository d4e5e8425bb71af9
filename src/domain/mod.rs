// Domain layer: documents, resolved records and ports (interfaces).

pub mod documents;
pub mod model;
pub mod ports;
