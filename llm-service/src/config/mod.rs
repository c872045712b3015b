//! Configuration types and env-driven constructors.

pub mod defaults;
pub mod model;
pub mod provider;

pub use defaults::{embedding_from_env, generation_from_env};
pub use model::ModelConfig;
pub use provider::Provider;
