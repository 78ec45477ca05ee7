pub mod application;
pub mod domain;
pub mod infrastructure;

mod app_context;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app_context::AppContext;
