pub mod bias;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod evaluation;
pub mod loader;
pub mod menu;
pub mod output;
pub mod pedagogy;
pub mod readability;
pub mod scoring;
pub mod text;

pub use error::{EvalError, Result};
pub use evaluation::{EngineKind, Evaluation, Evaluator};
pub use loader::{load_material, Document};
