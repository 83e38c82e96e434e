// CodedEnum synthesis: code/desc fields, two private constructors, getters,
// and the static of(code) factory. Fields, constructors and getters skip
// silently when present; only a conflicting `of` raises a warning.

use super::inject::inject;
use super::plan::CodedEnumPlan;
use super::TagStats;
use crate::ast::{BodyPlan, CapabilityKind, Member, Modifiers, TypeRef, CONSTRUCTOR_NAME};
use crate::builders::{BuilderError, ConstructorBuilder, FieldBuilder, MemberBuilder, MethodBuilder};
use crate::error_reporting::{DiagnosticReporter, SourceSpan};
use crate::host::{Arity, DeclarationHost};

const OF_METHOD_NAME: &str = "of";

/// Fixed diagnostic message thrown by the generated factory when no enum
/// constant matches the requested code. Part of the observable contract.
pub const UNKNOWN_CODE_MESSAGE: &str = "Unknown code value, please check again";

pub(crate) fn apply<H: DeclarationHost>(
    host: &mut H,
    plan: &CodedEnumPlan,
    span: &SourceSpan,
    reporter: &mut DiagnosticReporter,
) -> Result<TagStats, BuilderError> {
    let mut stats = TagStats::default();
    let self_type = TypeRef::new(host.name());

    add_field(host, &plan.code_name, TypeRef::new("Integer"), &mut stats)?;
    add_field(host, &plan.desc_name, TypeRef::new("String"), &mut stats)?;
    add_constructors(host, plan, &mut stats)?;
    add_getter(host, &plan.code_name, TypeRef::new("Integer"), &mut stats)?;
    add_getter(host, &plan.desc_name, TypeRef::new("String"), &mut stats)?;

    if host.exists(OF_METHOD_NAME, Arity::Any) {
        reporter.warning(span, &format!("Method '{}' already exists.", OF_METHOD_NAME));
        stats.skipped += 1;
    } else {
        inject(host, of_factory(plan, &self_type)?, CapabilityKind::CodedEnum);
        stats.injected += 1;
    }

    Ok(stats)
}

fn add_field<H: DeclarationHost>(
    host: &mut H,
    name: &str,
    ty: TypeRef,
    stats: &mut TagStats,
) -> Result<(), BuilderError> {
    if host.field_exists(name) {
        stats.skipped += 1;
        return Ok(());
    }
    let field = FieldBuilder::new(name)
        .with_type(ty)
        .generated_by(CapabilityKind::CodedEnum)
        .build()?;
    inject(host, field, CapabilityKind::CodedEnum);
    stats.injected += 1;
    Ok(())
}

/// A private one-arg constructor taking the code field and a private
/// two-arg constructor taking code and desc. Identity-checked by arity so
/// repeated passes converge.
fn add_constructors<H: DeclarationHost>(
    host: &mut H,
    plan: &CodedEnumPlan,
    stats: &mut TagStats,
) -> Result<(), BuilderError> {
    if host.exists(CONSTRUCTOR_NAME, Arity::Exact(1)) {
        stats.skipped += 1;
    } else {
        let ctor = ConstructorBuilder::new()
            .with_parameter(&plan.code_name, TypeRef::new("Integer"))
            .generated_by(CapabilityKind::CodedEnum)
            .build()?;
        inject(host, ctor, CapabilityKind::CodedEnum);
        stats.injected += 1;
    }

    if host.exists(CONSTRUCTOR_NAME, Arity::Exact(2)) {
        stats.skipped += 1;
    } else {
        let ctor = ConstructorBuilder::new()
            .with_parameter(&plan.code_name, TypeRef::new("Integer"))
            .with_parameter(&plan.desc_name, TypeRef::new("String"))
            .generated_by(CapabilityKind::CodedEnum)
            .build()?;
        inject(host, ctor, CapabilityKind::CodedEnum);
        stats.injected += 1;
    }

    Ok(())
}

fn add_getter<H: DeclarationHost>(
    host: &mut H,
    field_name: &str,
    ty: TypeRef,
    stats: &mut TagStats,
) -> Result<(), BuilderError> {
    let getter = getter_name(field_name);
    if host.exists(&getter, Arity::Exact(0)) {
        stats.skipped += 1;
        return Ok(());
    }
    let method = MethodBuilder::new(&getter)
        .returns(ty)
        .with_body(BodyPlan::GetField(field_name.to_string()))
        .generated_by(CapabilityKind::CodedEnum)
        .build()?;
    inject(host, method, CapabilityKind::CodedEnum);
    stats.injected += 1;
    Ok(())
}

/// `public static Self of(Integer code)` — iterates the enum's constants in
/// declaration order, returns the first whose code field equals the
/// argument, throws an invalid-argument failure otherwise.
fn of_factory(plan: &CodedEnumPlan, self_type: &TypeRef) -> Result<Member, BuilderError> {
    MethodBuilder::new(OF_METHOD_NAME)
        .with_modifiers(Modifiers::public_static())
        .with_parameter(&plan.code_name, TypeRef::new("Integer"))
        .returns(self_type.clone())
        .with_body(BodyPlan::MatchCodeOrFail {
            code_field: plan.code_name.clone(),
            failure_message: UNKNOWN_CODE_MESSAGE.to_string(),
        })
        .generated_by(CapabilityKind::CodedEnum)
        .build()
}

fn getter_name(field_name: &str) -> String {
    let mut chars = field_name.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}
