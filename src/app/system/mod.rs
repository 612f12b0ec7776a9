pub mod handler;
pub mod model;

pub use model::ServiceInfo;
