use super::{BuilderError, MemberBuilder};
use crate::ast::{
    BodyPlan, CapabilityKind, Member, MethodDecl, Modifiers, Parameter, Provenance, TypeRef,
};

/// Fluent interface builder for synthetic method descriptors.
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    modifiers: Modifiers,
    type_parameters: Vec<String>,
    parameters: Vec<Parameter>,
    return_type: Option<TypeRef>,
    body: BodyPlan,
    provenance: Option<Provenance>,
}

impl MethodBuilder {
    /// Create a new MethodBuilder with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: Modifiers::public(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            body: BodyPlan::Empty,
            provenance: None,
        }
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Add a type parameter, e.g. `T`.
    pub fn with_type_parameter(mut self, name: &str) -> Self {
        self.type_parameters.push(name.to_string());
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, name: &str, ty: TypeRef) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Set the body plan.
    pub fn with_body(mut self, body: BodyPlan) -> Self {
        self.body = body;
        self
    }

    /// Stamp the member with the capability that produced it.
    pub fn generated_by(mut self, capability: CapabilityKind) -> Self {
        self.provenance = Some(Provenance { capability });
        self
    }
}

impl MemberBuilder for MethodBuilder {
    fn build(self) -> Result<Member, BuilderError> {
        self.validate()
            .map_err(|errors| BuilderError::Validation(errors.join(", ")))?;
        let return_type = self
            .return_type
            .ok_or_else(|| BuilderError::MissingField("return_type".to_string()))?;
        Ok(Member::Method(MethodDecl {
            name: self.name,
            modifiers: self.modifiers,
            type_parameters: self.type_parameters,
            parameters: self.parameters,
            return_type,
            body: self.body,
            provenance: self.provenance,
        }))
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push("Method name cannot be empty".to_string());
        }
        if self.return_type.is_none() {
            errors.push("Return type is required".to_string());
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
    use crate::ast::{CallArg, LibFn};

    #[test]
    fn test_basic_method() {
        let member = MethodBuilder::new("toJson")
            .returns(TypeRef::new("String"))
            .with_body(BodyPlan::ReturnLibCall {
                function: LibFn::BeanToJson,
                args: vec![CallArg::This],
            })
            .generated_by(CapabilityKind::JsonSerializable)
            .build()
            .unwrap();

        assert_eq!(member.name(), "toJson");
        assert_eq!(member.arity(), Some(0));
        assert!(member.is_generated());
    }

    #[test]
    fn test_missing_return_type_fails() {
        let result = MethodBuilder::new("toJson").build();
        assert!(result.is_err());
    }
}
