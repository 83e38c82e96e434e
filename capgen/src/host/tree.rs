// Flat-tree backend: one ordered member list, the shape of a host compiler
// that keeps every definition of a type in a single `defs` vector.

use super::{Arity, DeclarationHost, MethodSig};
use crate::ast::{DeclKind, EnumConstant, Member};
use crate::tags::CapabilityTag;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeDeclaration {
    name: String,
    kind: DeclKind,
    tags: Vec<CapabilityTag>,
    members: Vec<Member>,
    constants: Vec<EnumConstant>,
}

impl TreeDeclaration {
    pub fn new(name: &str, kind: DeclKind) -> Self {
        TreeDeclaration {
            name: name.to_string(),
            kind,
            tags: Vec::new(),
            members: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: CapabilityTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Adds an author-written member.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_constant(mut self, constant: EnumConstant) -> Self {
        self.constants.push(constant);
        self
    }
}

impl DeclarationHost for TreeDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeclKind {
        self.kind
    }

    fn exists(&self, name: &str, arity: Arity) -> bool {
        self.members.iter().any(|m| {
            m.name() == name && m.arity().map(|count| arity.matches(count)).unwrap_or(false)
        })
    }

    fn field_exists(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m, Member::Field(_)) && m.name() == name)
    }

    fn inject(&mut self, member: Member) {
        self.members.push(member);
    }

    fn members(&self) -> Vec<Member> {
        self.members.clone()
    }

    fn method_signatures(&self) -> Vec<MethodSig> {
        self.members
            .iter()
            .filter_map(|m| match m {
                Member::Method(method) => Some(MethodSig {
                    name: method.name.clone(),
                    arity: method.parameters.len(),
                }),
                _ => None,
            })
            .collect()
    }

    fn attach_parameter_marker(&mut self, method: &str, arity: usize, marker: &str) {
        for m in &mut self.members {
            if let Member::Method(decl) = m {
                if decl.name == method && decl.parameters.len() == arity {
                    for param in &mut decl.parameters {
                        if !param.markers.iter().any(|m| m == marker) {
                            param.markers.push(marker.to_string());
                        }
                    }
                }
            }
        }
    }

    fn enum_constants(&self) -> &[EnumConstant] {
        &self.constants
    }

    fn take_tags(&mut self) -> Vec<CapabilityTag> {
        std::mem::take(&mut self.tags)
    }
}
