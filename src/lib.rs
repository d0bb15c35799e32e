pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod property;
pub mod seed;
pub mod wire;
