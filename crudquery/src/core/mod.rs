// Per-resource list contract and the generic axum handler built on it

pub mod handlers;
pub mod traits;

pub use handlers::list_handler;
pub use traits::ListResource;
