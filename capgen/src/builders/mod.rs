// Member descriptor builders.
// Fluent interfaces for constructing synthetic member descriptors; the
// synthesizers assemble members here and hand them to the injector.

pub mod constructor_builder;
pub mod field_builder;
pub mod method_builder;

pub use constructor_builder::ConstructorBuilder;
pub use field_builder::FieldBuilder;
pub use method_builder::MethodBuilder;

use crate::ast::Member;

/// Common trait for all member builders.
pub trait MemberBuilder {
    /// Build the final member descriptor, consuming the builder.
    fn build(self) -> Result<Member, BuilderError>;

    /// Validate the current state without building.
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// Error type for builder operations.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field '{0}': {1}")]
    InvalidValue(String, String),
}
