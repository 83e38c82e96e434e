use super::{BuilderError, MemberBuilder};
use crate::ast::{
    BodyPlan, CapabilityKind, ConstructorDecl, Member, Modifiers, Parameter, Provenance, TypeRef,
};

/// Fluent interface builder for synthetic constructor descriptors.
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    modifiers: Modifiers,
    parameters: Vec<Parameter>,
    provenance: Option<Provenance>,
}

impl ConstructorBuilder {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::private(),
            parameters: Vec::new(),
            provenance: None,
        }
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, name: &str, ty: TypeRef) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Stamp the member with the capability that produced it.
    pub fn generated_by(mut self, capability: CapabilityKind) -> Self {
        self.provenance = Some(Provenance { capability });
        self
    }
}

impl Default for ConstructorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberBuilder for ConstructorBuilder {
    fn build(self) -> Result<Member, BuilderError> {
        self.validate()
            .map_err(|errors| BuilderError::Validation(errors.join(", ")))?;
        // The body assigns each parameter to the same-named field.
        let assigned = self.parameters.iter().map(|p| p.name.clone()).collect();
        Ok(Member::Constructor(ConstructorDecl {
            modifiers: self.modifiers,
            parameters: self.parameters,
            body: BodyPlan::AssignFields(assigned),
            provenance: self.provenance,
        }))
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        let mut seen = Vec::new();
        let mut errors = Vec::new();
        for param in &self.parameters {
            if seen.contains(&&param.name) {
                errors.push(format!("Duplicate parameter name '{}'", param.name));
            }
            seen.push(&param.name);
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
    use crate::ast::CONSTRUCTOR_NAME;

    #[test]
    fn test_two_arg_constructor() {
        let member = ConstructorBuilder::new()
            .with_parameter("code", TypeRef::new("Integer"))
            .with_parameter("desc", TypeRef::new("String"))
            .generated_by(CapabilityKind::CodedEnum)
            .build()
            .unwrap();

        assert_eq!(member.name(), CONSTRUCTOR_NAME);
        assert_eq!(member.arity(), Some(2));
        match member {
            Member::Constructor(c) => assert_eq!(
                c.body,
                BodyPlan::AssignFields(vec!["code".to_string(), "desc".to_string()])
            ),
            _ => panic!("Expected a constructor"),
        }
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let result = ConstructorBuilder::new()
            .with_parameter("code", TypeRef::new("Integer"))
            .with_parameter("code", TypeRef::new("Integer"))
            .build();
        assert!(result.is_err());
    }
}
