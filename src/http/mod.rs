pub mod codec;
pub mod errors;
pub mod routes;

pub use routes::router;
