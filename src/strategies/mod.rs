pub mod rendered;
pub mod static_fetch;

pub use rendered::RenderError;
pub use static_fetch::FetchError;
