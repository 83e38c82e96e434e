// Configuration resolution.
// Normalizes a tag's declarative configuration into a typed plan. Pure and
// total: absent or blank configuration falls back to defaults, never errors.

use crate::ast::TypeRef;
use crate::tags::{Capability, CodedEnumConfig, ConvertibleConfig, JsonSerializableConfig};

/// Which signature variant the Convertible pair uses. Decided once per
/// declaration; both generated methods follow the same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertiblePlan {
    /// No counterpart type named at the tag site: `toBean<T>(Class<T>)` /
    /// `fromBean<T>(T)`.
    Generic,
    /// Counterpart type known at the tag site: `toBean(): T` /
    /// `fromBean(T): Self`.
    Explicit(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPlan {
    /// Carried verbatim; enforcement belongs to the sibling constructor
    /// capability. Empty means "plain public constructor".
    pub static_constructor: String,
    /// Field names excluded from sibling-generated equality/constructor
    /// members. Carried, not enforced here.
    pub exclude: Vec<String>,
}

impl JsonPlan {
    /// The factory name, when one was configured.
    pub fn static_constructor(&self) -> Option<&str> {
        if self.static_constructor.is_empty() {
            None
        } else {
            Some(&self.static_constructor)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedEnumPlan {
    pub code_name: String,
    pub desc_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Convertible(ConvertiblePlan),
    Json(JsonPlan),
    CodedEnum(CodedEnumPlan),
    Validated,
}

/// Resolve a capability's configuration into a plan.
pub fn resolve(capability: &Capability) -> Plan {
    match capability {
        Capability::Convertible(config) => Plan::Convertible(resolve_convertible(config)),
        Capability::JsonSerializable(config) => Plan::Json(resolve_json(config)),
        Capability::CodedEnum(config) => Plan::CodedEnum(resolve_coded_enum(config)),
        Capability::Validated => Plan::Validated,
    }
}

fn resolve_convertible(config: &ConvertibleConfig) -> ConvertiblePlan {
    match normalize_target(config.target_type.as_deref()) {
        Some(name) => ConvertiblePlan::Explicit(TypeRef::new(&name)),
        None => ConvertiblePlan::Generic,
    }
}

fn resolve_json(config: &JsonSerializableConfig) -> JsonPlan {
    JsonPlan {
        static_constructor: config.static_constructor.clone(),
        exclude: config.exclude.clone(),
    }
}

fn resolve_coded_enum(config: &CodedEnumConfig) -> CodedEnumPlan {
    CodedEnumPlan {
        code_name: or_default(&config.code_name, "code"),
        desc_name: or_default(&config.desc_name, "desc"),
    }
}

/// Normalizes an explicit target type literal. A trailing `.class` suffix
/// is stripped; blank input means "no target named" and selects the
/// generic variant.
fn normalize_target(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    let stripped = trimmed.strip_suffix(".class").unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
