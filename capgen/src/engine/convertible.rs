// Convertible synthesis: the toBean/fromBean pair.
// The generic variant exists so the capability works without a named
// counterpart type; the explicit variant avoids a redundant Class argument
// when the pairing is known at the tag site.

use super::inject::inject;
use super::plan::ConvertiblePlan;
use super::TagStats;
use crate::ast::{BodyPlan, CallArg, CapabilityKind, LibFn, Modifiers, TypeRef};
use crate::builders::{BuilderError, MemberBuilder, MethodBuilder};
use crate::error_reporting::{DiagnosticReporter, SourceSpan};
use crate::host::{Arity, DeclarationHost};

const TO_BEAN_NAME: &str = "toBean";
const FROM_BEAN_NAME: &str = "fromBean";
const CLAZZ_PARAM_NAME: &str = "clazz";
const PARAM_PARAM_NAME: &str = "param";
const POJO_PARAM_NAME: &str = "pojo";

pub(crate) fn apply<H: DeclarationHost>(
    host: &mut H,
    plan: &ConvertiblePlan,
    span: &SourceSpan,
    reporter: &mut DiagnosticReporter,
) -> Result<TagStats, BuilderError> {
    let mut stats = TagStats::default();
    let self_type = TypeRef::new(host.name());

    if host.exists(TO_BEAN_NAME, Arity::Any) {
        reporter.warning(span, &format!("Field '{}' already exists.", TO_BEAN_NAME));
        stats.skipped += 1;
    } else {
        let method = match plan {
            ConvertiblePlan::Generic => to_bean_generic()?,
            ConvertiblePlan::Explicit(target) => to_bean_explicit(target)?,
        };
        inject(host, method, CapabilityKind::Convertible);
        stats.injected += 1;
    }

    if host.exists(FROM_BEAN_NAME, Arity::Exact(1)) {
        reporter.warning(span, &format!("Field '{}' already exists.", FROM_BEAN_NAME));
        stats.skipped += 1;
    } else {
        let method = match plan {
            ConvertiblePlan::Generic => from_bean_generic(&self_type)?,
            ConvertiblePlan::Explicit(target) => from_bean_explicit(target, &self_type)?,
        };
        inject(host, method, CapabilityKind::Convertible);
        stats.injected += 1;
    }

    Ok(stats)
}

/// `public <T> T toBean(Class<T> clazz) { return convert(this, clazz); }`
fn to_bean_generic() -> Result<crate::ast::Member, BuilderError> {
    MethodBuilder::new(TO_BEAN_NAME)
        .with_type_parameter("T")
        .with_parameter(CLAZZ_PARAM_NAME, TypeRef::class_of(TypeRef::new("T")))
        .returns(TypeRef::new("T"))
        .with_body(BodyPlan::ReturnLibCall {
            function: LibFn::Convert,
            args: vec![CallArg::This, CallArg::Param(CLAZZ_PARAM_NAME.to_string())],
        })
        .generated_by(CapabilityKind::Convertible)
        .build()
}

/// `public T toBean() { return convert(this, T.class); }`
fn to_bean_explicit(target: &TypeRef) -> Result<crate::ast::Member, BuilderError> {
    MethodBuilder::new(TO_BEAN_NAME)
        .returns(target.clone())
        .with_body(BodyPlan::ReturnLibCall {
            function: LibFn::Convert,
            args: vec![CallArg::This, CallArg::ClassOf(target.clone())],
        })
        .generated_by(CapabilityKind::Convertible)
        .build()
}

/// `public static <T> Self fromBean(T param) { return convert(param, Self.class); }`
fn from_bean_generic(self_type: &TypeRef) -> Result<crate::ast::Member, BuilderError> {
    MethodBuilder::new(FROM_BEAN_NAME)
        .with_modifiers(Modifiers::public_static())
        .with_type_parameter("T")
        .with_parameter(PARAM_PARAM_NAME, TypeRef::new("T"))
        .returns(self_type.clone())
        .with_body(BodyPlan::ReturnLibCall {
            function: LibFn::Convert,
            args: vec![
                CallArg::Param(PARAM_PARAM_NAME.to_string()),
                CallArg::ClassOf(self_type.clone()),
            ],
        })
        .generated_by(CapabilityKind::Convertible)
        .build()
}

/// `public static Self fromBean(T pojo) { return convert(pojo, Self.class); }`
fn from_bean_explicit(
    target: &TypeRef,
    self_type: &TypeRef,
) -> Result<crate::ast::Member, BuilderError> {
    MethodBuilder::new(FROM_BEAN_NAME)
        .with_modifiers(Modifiers::public_static())
        .with_parameter(POJO_PARAM_NAME, target.clone())
        .returns(self_type.clone())
        .with_body(BodyPlan::ReturnLibCall {
            function: LibFn::Convert,
            args: vec![
                CallArg::Param(POJO_PARAM_NAME.to_string()),
                CallArg::ClassOf(self_type.clone()),
            ],
        })
        .generated_by(CapabilityKind::Convertible)
        .build()
}
