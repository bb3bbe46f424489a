pub mod loader;
pub mod orders;
