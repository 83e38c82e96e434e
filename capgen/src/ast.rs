use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Declaration kinds ---

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    Class,
    Enum,
    Interface,
    Annotation,
}

// --- Type references ---

/// A reference to a type by name, with optional type arguments.
/// `Class<T>` is `TypeRef::with_args("Class", vec![TypeRef::new("T")])`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TypeRef {
    pub name: String,
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(name: &str) -> Self {
        TypeRef {
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    pub fn with_args(name: &str, args: Vec<TypeRef>) -> Self {
        TypeRef {
            name: name.to_string(),
            args,
        }
    }

    /// `Class<inner>` — the reified-class parameter type of the generic
    /// conversion signature.
    pub fn class_of(inner: TypeRef) -> Self {
        TypeRef::with_args("Class", vec![inner])
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            let args = self
                .args
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "<{}>", args)?;
        }
        Ok(())
    }
}

// --- Modifiers ---

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Private,
    PackagePrivate,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Modifiers {
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    pub fn public_static() -> Self {
        Modifiers {
            visibility: Visibility::Public,
            is_static: true,
        }
    }

    pub fn private() -> Self {
        Modifiers {
            visibility: Visibility::Private,
            is_static: false,
        }
    }
}

// --- Parameters ---

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
    /// Markers attached to the parameter by capability passes
    /// (fully-qualified annotation names).
    pub markers: Vec<String>,
}

impl Parameter {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Parameter {
            name: name.to_string(),
            ty,
            markers: Vec::new(),
        }
    }
}

// --- Library contract consumed by generated bodies ---

/// The opaque runtime library functions generated bodies call into.
/// The engine only emits calls by fixed, fully-qualified name.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum LibFn {
    Convert,
    BeanToJson,
    JsonToBean,
}

impl LibFn {
    pub fn qualified_name(&self) -> &'static str {
        match self {
            LibFn::Convert => "com.xyz.utils.JsonUtils.convert",
            LibFn::BeanToJson => "com.xyz.utils.JsonUtils.beanToJson",
            LibFn::JsonToBean => "com.xyz.utils.JsonUtils.jsonToBean",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CallArg {
    /// The receiver instance.
    This,
    /// A parameter of the enclosing member, by name.
    Param(String),
    /// A reified class literal, `T.class`.
    ClassOf(TypeRef),
}

// --- Body plans ---

/// A small instruction describing what a synthesized member body does.
/// The engine plans bodies; it never executes them.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BodyPlan {
    /// `return lib.fn(args...)`
    ReturnLibCall { function: LibFn, args: Vec<CallArg> },
    /// Iterate the enum's constants in declaration order, return the first
    /// whose code field equals the argument, throw otherwise.
    MatchCodeOrFail {
        code_field: String,
        failure_message: String,
    },
    /// Constructor body assigning the named fields from same-named params.
    AssignFields(Vec<String>),
    /// `return this.field`
    GetField(String),
    Empty,
}

// --- Provenance ---

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CapabilityKind {
    Convertible,
    JsonSerializable,
    CodedEnum,
    Validated,
}

impl CapabilityKind {
    /// The tag surface name, as it appears in diagnostics.
    pub fn tag_name(&self) -> &'static str {
        match self {
            CapabilityKind::Convertible => "Convertible",
            CapabilityKind::JsonSerializable => "JsonSerializable",
            CapabilityKind::CodedEnum => "CodedEnum",
            CapabilityKind::Validated => "Validated",
        }
    }
}

/// Generated-by stamp on a synthetic member. An explicit field rather than
/// structural tree mutation, so idempotency checks stay a pure function of
/// declared state.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct Provenance {
    pub capability: CapabilityKind,
}

// --- Members ---

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeRef,
    pub body: BodyPlan,
    pub provenance: Option<Provenance>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConstructorDecl {
    pub modifiers: Modifiers,
    pub parameters: Vec<Parameter>,
    pub body: BodyPlan,
    pub provenance: Option<Provenance>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub provenance: Option<Provenance>,
}

/// Constructors are identified by the conventional `<init>` name for the
/// purposes of the (name, arity) existence check.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Member {
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Field(FieldDecl),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Constructor(_) => CONSTRUCTOR_NAME,
            Member::Field(f) => &f.name,
        }
    }

    /// Parameter count; `None` for fields, which carry no arity.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Member::Method(m) => Some(m.parameters.len()),
            Member::Constructor(c) => Some(c.parameters.len()),
            Member::Field(_) => None,
        }
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        match self {
            Member::Method(m) => m.provenance.as_ref(),
            Member::Constructor(c) => c.provenance.as_ref(),
            Member::Field(f) => f.provenance.as_ref(),
        }
    }

    pub fn is_generated(&self) -> bool {
        self.provenance().is_some()
    }

    pub fn set_provenance(&mut self, provenance: Provenance) {
        match self {
            Member::Method(m) => m.provenance = Some(provenance),
            Member::Constructor(c) => c.provenance = Some(provenance),
            Member::Field(f) => f.provenance = Some(provenance),
        }
    }
}

// --- Enum constants ---

/// One declared constant of an enum declaration, in source order. The code
/// and description values feed the generated `of(code)` factory contract.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnumConstant {
    pub name: String,
    pub code: Option<i64>,
    pub desc: Option<String>,
}

impl EnumConstant {
    pub fn new(name: &str, code: i64, desc: &str) -> Self {
        EnumConstant {
            name: name.to_string(),
            code: Some(code),
            desc: Some(desc.to_string()),
        }
    }

    pub fn bare(name: &str) -> Self {
        EnumConstant {
            name: name.to_string(),
            code: None,
            desc: None,
        }
    }
}
