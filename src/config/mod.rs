pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::DEFAULT_SETTINGS;
pub use loader::ConfigLoader;
pub use types::*;
