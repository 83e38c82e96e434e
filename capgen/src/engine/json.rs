// JsonSerializable synthesis: the toJson/fromJson pair.
// Bodies route through the opaque runtime library by fixed qualified name.

use super::inject::inject;
use super::plan::JsonPlan;
use super::TagStats;
use crate::ast::{BodyPlan, CallArg, CapabilityKind, LibFn, Member, Modifiers, TypeRef};
use crate::builders::{BuilderError, MemberBuilder, MethodBuilder};
use crate::error_reporting::{DiagnosticReporter, SourceSpan};
use crate::host::{Arity, DeclarationHost};

const TO_JSON_METHOD_NAME: &str = "toJson";
const FROM_JSON_METHOD_NAME: &str = "fromJson";
const JSON_STRING_PARAMETER_NAME: &str = "jsonStr";

pub(crate) fn apply<H: DeclarationHost>(
    host: &mut H,
    plan: &JsonPlan,
    span: &SourceSpan,
    reporter: &mut DiagnosticReporter,
) -> Result<TagStats, BuilderError> {
    // The static-constructor name and exclusion set ride on the plan for the
    // sibling constructor/equality capabilities; this pass only emits the
    // serialization pair.
    if let Some(factory) = plan.static_constructor() {
        log::trace!("static constructor '{}' delegated to sibling capability", factory);
    }

    let mut stats = TagStats::default();
    let self_type = TypeRef::new(host.name());

    if host.exists(TO_JSON_METHOD_NAME, Arity::Any) {
        reporter.warning(
            span,
            &format!("Method '{}' already exists.", TO_JSON_METHOD_NAME),
        );
        stats.skipped += 1;
    } else {
        inject(host, to_json()?, CapabilityKind::JsonSerializable);
        stats.injected += 1;
    }

    if host.exists(FROM_JSON_METHOD_NAME, Arity::Exact(1)) {
        reporter.warning(
            span,
            &format!("Method '{}' already exists.", FROM_JSON_METHOD_NAME),
        );
        stats.skipped += 1;
    } else {
        inject(host, from_json(&self_type)?, CapabilityKind::JsonSerializable);
        stats.injected += 1;
    }

    Ok(stats)
}

/// `public String toJson() { return beanToJson(this); }`
fn to_json() -> Result<Member, BuilderError> {
    MethodBuilder::new(TO_JSON_METHOD_NAME)
        .returns(TypeRef::new("String"))
        .with_body(BodyPlan::ReturnLibCall {
            function: LibFn::BeanToJson,
            args: vec![CallArg::This],
        })
        .generated_by(CapabilityKind::JsonSerializable)
        .build()
}

/// `public static Self fromJson(String jsonStr) { return jsonToBean(jsonStr, Self.class); }`
fn from_json(self_type: &TypeRef) -> Result<Member, BuilderError> {
    MethodBuilder::new(FROM_JSON_METHOD_NAME)
        .with_modifiers(Modifiers::public_static())
        .with_parameter(JSON_STRING_PARAMETER_NAME, TypeRef::new("String"))
        .returns(self_type.clone())
        .with_body(BodyPlan::ReturnLibCall {
            function: LibFn::JsonToBean,
            args: vec![
                CallArg::Param(JSON_STRING_PARAMETER_NAME.to_string()),
                CallArg::ClassOf(self_type.clone()),
            ],
        })
        .generated_by(CapabilityKind::JsonSerializable)
        .build()
}
