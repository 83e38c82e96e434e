// Split-table backend: fields, constructors and methods live in separate
// per-kind tables, the shape of a host compiler that models a type as
// parallel member arrays. Behavior must stay indistinguishable from the
// flat-tree backend, so a global insertion-order list sits alongside the
// tables and drives the member snapshot.

use super::{Arity, DeclarationHost, MethodSig};
use crate::ast::{ConstructorDecl, DeclKind, EnumConstant, FieldDecl, Member, MethodDecl, CONSTRUCTOR_NAME};
use crate::tags::CapabilityTag;
use indexmap::IndexMap;

/// Where one member landed in its per-kind table, in insertion order.
#[derive(Debug, Clone, PartialEq)]
enum MemberSlot {
    Field(String),
    Constructor(usize),
    Method(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDeclaration {
    name: String,
    kind: DeclKind,
    tags: Vec<CapabilityTag>,
    fields: IndexMap<String, FieldDecl>,
    constructors: Vec<ConstructorDecl>,
    methods: Vec<MethodDecl>,
    order: Vec<MemberSlot>,
    constants: Vec<EnumConstant>,
}

impl TableDeclaration {
    pub fn new(name: &str, kind: DeclKind) -> Self {
        TableDeclaration {
            name: name.to_string(),
            kind,
            tags: Vec::new(),
            fields: IndexMap::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            order: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: CapabilityTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Adds an author-written member into its per-kind table.
    pub fn with_member(mut self, member: Member) -> Self {
        self.insert(member);
        self
    }

    pub fn with_constant(mut self, constant: EnumConstant) -> Self {
        self.constants.push(constant);
        self
    }

    fn insert(&mut self, member: Member) {
        match member {
            Member::Field(f) => {
                let name = f.name.clone();
                if self.fields.insert(name.clone(), f).is_none() {
                    self.order.push(MemberSlot::Field(name));
                }
            }
            Member::Constructor(c) => {
                self.order.push(MemberSlot::Constructor(self.constructors.len()));
                self.constructors.push(c);
            }
            Member::Method(m) => {
                self.order.push(MemberSlot::Method(self.methods.len()));
                self.methods.push(m);
            }
        }
    }
}

impl DeclarationHost for TableDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeclKind {
        self.kind
    }

    fn exists(&self, name: &str, arity: Arity) -> bool {
        if name == CONSTRUCTOR_NAME {
            return self
                .constructors
                .iter()
                .any(|c| arity.matches(c.parameters.len()));
        }
        self.methods
            .iter()
            .any(|m| m.name == name && arity.matches(m.parameters.len()))
    }

    fn field_exists(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn inject(&mut self, member: Member) {
        self.insert(member);
    }

    fn members(&self) -> Vec<Member> {
        self.order
            .iter()
            .filter_map(|slot| match slot {
                MemberSlot::Field(name) => self.fields.get(name).cloned().map(Member::Field),
                MemberSlot::Constructor(idx) => {
                    self.constructors.get(*idx).cloned().map(Member::Constructor)
                }
                MemberSlot::Method(idx) => self.methods.get(*idx).cloned().map(Member::Method),
            })
            .collect()
    }

    fn method_signatures(&self) -> Vec<MethodSig> {
        self.methods
            .iter()
            .map(|m| MethodSig {
                name: m.name.clone(),
                arity: m.parameters.len(),
            })
            .collect()
    }

    fn attach_parameter_marker(&mut self, method: &str, arity: usize, marker: &str) {
        for decl in &mut self.methods {
            if decl.name == method && decl.parameters.len() == arity {
                for param in &mut decl.parameters {
                    if !param.markers.iter().any(|m| m == marker) {
                        param.markers.push(marker.to_string());
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
