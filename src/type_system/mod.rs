//! Input type compatibility for graph inputs.
//!
//! Declared types arrive as a closed `TypeAnnotation` built once at declaration
//! time; `check_input_type` is a pure match over it and never fails.

pub use self::annotation::{Container, RuntimeType, TypeAnnotation};
pub use self::checker::check_input_type;

// --- MODULE DECLARATIONS ---
mod annotation;
mod checker;
