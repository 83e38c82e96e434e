// capgen — capability-driven member synthesis engine.
// Given a declaration tagged with a capability marker, the engine inspects
// the declaration's existing members and injects synthetic ones implementing
// the requested capability, without re-emitting anything the author already
// wrote by hand.

pub mod ast;
pub mod builders;
pub mod engine;
pub mod error_reporting;
pub mod host;
pub mod tags;

// Re-export the key components so host-compiler adapters and tests reach
// everything from the crate root.

pub use ast::*;
pub use builders::{
    BuilderError, ConstructorBuilder, FieldBuilder, MemberBuilder, MethodBuilder,
};
pub use engine::{
    classify, process_tag, required_kind, resolve, run_pass, CodedEnumPlan, ConvertiblePlan,
    EngineError, JsonPlan, PassReport, PassState, Plan, RequiredKind, TagOutcome, TagStats,
    UNKNOWN_CODE_MESSAGE, VALIDATED_MARKER,
};
pub use error_reporting::{
    Diagnostic, DiagnosticFormatter, DiagnosticReporter, Severity, SourceSpan,
};
pub use host::{Arity, DeclarationHost, MethodSig, TableDeclaration, TreeDeclaration};
pub use tags::{
    Capability, CapabilityTag, CodedEnumConfig, ConvertibleConfig, JsonSerializableConfig,
};
