use super::{BuilderError, MemberBuilder};
use crate::ast::{CapabilityKind, FieldDecl, Member, Modifiers, Provenance, TypeRef};

/// Fluent interface builder for synthetic field descriptors.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    modifiers: Modifiers,
    ty: Option<TypeRef>,
    provenance: Option<Provenance>,
}

impl FieldBuilder {
    /// Create a new FieldBuilder with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: Modifiers::private(),
            ty: None,
            provenance: None,
        }
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the field type.
    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Stamp the member with the capability that produced it.
    pub fn generated_by(mut self, capability: CapabilityKind) -> Self {
        self.provenance = Some(Provenance { capability });
        self
    }
}

impl MemberBuilder for FieldBuilder {
    fn build(self) -> Result<Member, BuilderError> {
        self.validate()
            .map_err(|errors| BuilderError::Validation(errors.join(", ")))?;
        let ty = self
            .ty
            .ok_or_else(|| BuilderError::MissingField("type".to_string()))?;
        Ok(Member::Field(FieldDecl {
            name: self.name,
            modifiers: self.modifiers,
            ty,
            provenance: self.provenance,
        }))
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push("Field name cannot be empty".to_string());
        }
        if self.ty.is_none() {
            errors.push("Field type is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_field() {
        let member = FieldBuilder::new("code")
            .with_type(TypeRef::new("Integer"))
            .generated_by(CapabilityKind::CodedEnum)
            .build()
            .unwrap();

        assert_eq!(member.name(), "code");
        assert_eq!(member.arity(), None);
        assert!(member.is_generated());
    }
}
