//! HTTP execution over reqwest.

mod executor;
mod multipart;

pub use executor::ReqwestHttpExecutor;
pub use multipart::build_form;
