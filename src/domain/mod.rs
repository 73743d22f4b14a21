// Domain layer: models and ports (interfaces) shared by the presenter and its adapters.

pub mod model;
pub mod ports;
