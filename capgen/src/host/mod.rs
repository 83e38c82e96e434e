// Abstract declaration host.
// The engine operates against this narrow structural view so that two
// differently shaped host-compiler representations produce identical
// behavior; capability logic never branches on which backend it runs under.

pub mod table;
pub mod tree;

pub use table::TableDeclaration;
pub use tree::TreeDeclaration;

use crate::ast::{DeclKind, EnumConstant, Member};
use crate::tags::CapabilityTag;

/// Parameter-count selector for the existence check. `Any` is the loose
/// match used for "a member of this name, whatever its signature".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Any,
    Exact(usize),
}

impl Arity {
    pub fn matches(&self, count: usize) -> bool {
        match self {
            Arity::Any => true,
            Arity::Exact(n) => *n == count,
        }
    }
}

/// Name and arity of a declared method, the walk surface for the
/// parameter-marker capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub arity: usize,
}

/// The mutable structural view of one tagged declaration, borrowed from the
/// host compiler for the duration of a single pass.
///
/// `exists` is the sole idempotency guard: the engine re-derives every
/// decision from the current member list, so repeated passes converge to a
/// fixed point without external bookkeeping.
pub trait DeclarationHost {
    fn name(&self) -> &str;

    fn kind(&self) -> DeclKind;

    /// True when a method or constructor with the given name and a matching
    /// parameter count exists. Constructors answer to [`crate::ast::CONSTRUCTOR_NAME`].
    /// Fields carry no arity and are queried through [`Self::field_exists`].
    fn exists(&self, name: &str, arity: Arity) -> bool;

    fn field_exists(&self, name: &str) -> bool;

    /// Appends a member. Synthesized members land after all authored
    /// members and never reorder them.
    fn inject(&mut self, member: Member);

    /// Snapshot of the member list. Authored members come first, in
    /// declaration order, followed by injected members in injection order.
    fn members(&self) -> Vec<Member>;

    /// Declared (non-constructor) methods, for the parameter-marker walk.
    fn method_signatures(&self) -> Vec<MethodSig>;

    /// Attaches a marker to every parameter of the named method. Already
    /// present markers are not duplicated.
    fn attach_parameter_marker(&mut self, method: &str, arity: usize, marker: &str);

    /// Declared enum constants in source order; empty for non-enums.
    fn enum_constants(&self) -> &[EnumConstant];

    /// Removes and returns the capability tags attached to the declaration.
    /// Tags are not visible after the pass that consumed them.
    fn take_tags(&mut self) -> Vec<CapabilityTag>;
}
