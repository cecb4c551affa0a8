//! Decides whether a candidate value satisfies a declared input type.
use super::annotation::{RuntimeType, TypeAnnotation};
use crate::value::Value;

/// Returns whether `candidate` may be bound to an input declared as `declared`.
///
/// Rules, first match wins:
/// 1. `Any` and type variables accept everything.
/// 2. A union accepts a value any alternative accepts.
/// 3. A generic container accepts values of its outer kind, whatever the elements.
/// 4. An exact type accepts values of that type or a subtype. `int` and
///    `float` never substitute for one another.
pub fn check_input_type(declared: &TypeAnnotation, candidate: &Value) -> bool {
    match declared {
        TypeAnnotation::Any | TypeAnnotation::TypeVar(_) => true,
        TypeAnnotation::Union(alternatives) => alternatives.iter().any(|alt| check_input_type(alt, candidate)),
        TypeAnnotation::Generic(container) => RuntimeType::of(candidate) == container.runtime_type(),
        TypeAnnotation::Exact(expected) => RuntimeType::of(candidate).is_subtype_of(*expected),
    }
}
