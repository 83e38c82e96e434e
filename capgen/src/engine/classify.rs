// Target classification.
// A capability is only eligible on the declaration kind it requires; a
// rejected tag produces one error and no members at all.

use super::EngineError;
use crate::ast::{CapabilityKind, DeclKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredKind {
    Class,
    Enum,
}

impl fmt::Display for RequiredKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredKind::Class => write!(f, "a class"),
            RequiredKind::Enum => write!(f, "an enum"),
        }
    }
}

/// The declaration kind each capability requires.
pub fn required_kind(capability: CapabilityKind) -> RequiredKind {
    match capability {
        CapabilityKind::Convertible
        | CapabilityKind::JsonSerializable
        | CapabilityKind::Validated => RequiredKind::Class,
        CapabilityKind::CodedEnum => RequiredKind::Enum,
    }
}

/// Validates that the declaration is an eligible target for the capability.
/// The `Class` requirement rejects interfaces and annotation types; the
/// `Enum` requirement rejects anything that is not an enum.
pub fn classify(kind: DeclKind, capability: CapabilityKind) -> Result<(), EngineError> {
    let required = required_kind(capability);
    let eligible = match required {
        RequiredKind::Class => !matches!(kind, DeclKind::Interface | DeclKind::Annotation),
        RequiredKind::Enum => kind == DeclKind::Enum,
    };
    if eligible {
        Ok(())
    } else {
        Err(EngineError::InvalidTarget {
            tag: capability.tag_name(),
            required,
        })
    }
}
