// Capability tags and their declarative configuration.
// A tag is attached to exactly one declaration and consumed once per pass.

use crate::ast::CapabilityKind;
use crate::error_reporting::SourceSpan;
use serde::{Deserialize, Serialize};

/// Configuration for the `Convertible` capability.
///
/// An absent (or blank) `target_type` selects the generic signature variant;
/// a concrete name selects the explicit variant.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct ConvertibleConfig {
    #[serde(default)]
    pub target_type: Option<String>,
}

impl ConvertibleConfig {
    pub fn generic() -> Self {
        ConvertibleConfig { target_type: None }
    }

    pub fn explicit(target_type: &str) -> Self {
        ConvertibleConfig {
            target_type: Some(target_type.to_string()),
        }
    }
}

/// Configuration for the `JsonSerializable` capability.
///
/// `static_constructor` and `exclude` are carried verbatim on the resolved
/// plan; their enforcement belongs to sibling capabilities.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct JsonSerializableConfig {
    #[serde(default)]
    pub static_constructor: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Configuration for the `CodedEnum` capability.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CodedEnumConfig {
    #[serde(default = "default_code_name")]
    pub code_name: String,
    #[serde(default = "default_desc_name")]
    pub desc_name: String,
}

fn default_code_name() -> String {
    "code".to_string()
}

fn default_desc_name() -> String {
    "desc".to_string()
}

impl Default for CodedEnumConfig {
    fn default() -> Self {
        CodedEnumConfig {
            code_name: default_code_name(),
            desc_name: default_desc_name(),
        }
    }
}

/// The capability requested by a tag, with its configuration.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Convertible(ConvertibleConfig),
    JsonSerializable(JsonSerializableConfig),
    CodedEnum(CodedEnumConfig),
    Validated,
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Convertible(_) => CapabilityKind::Convertible,
            Capability::JsonSerializable(_) => CapabilityKind::JsonSerializable,
            Capability::CodedEnum(_) => CapabilityKind::CodedEnum,
            Capability::Validated => CapabilityKind::Validated,
        }
    }
}

/// A capability marker attached to a declaration, anchored to the source
/// location the diagnostics report against. Tags are removed from the
/// declaration when the pass consumes them.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CapabilityTag {
    pub capability: Capability,
    pub span: SourceSpan,
}

impl CapabilityTag {
    pub fn new(capability: Capability) -> Self {
        CapabilityTag {
            capability,
            span: SourceSpan::unknown(),
        }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    pub fn kind(&self) -> CapabilityKind {
        self.capability.kind()
    }
}
