pub mod engine;
pub mod model;
pub mod routes;

pub use routes::routes;
