// The synthesis engine.
// One pass drains the capability tags of a declaration and processes each
// through classify -> resolve -> synthesize -> inject. Tags are independent
// and commute; idempotency is re-derived from the member list every pass.

pub mod classify;
mod coded_enum;
mod convertible;
mod inject;
mod json;
pub mod plan;
pub mod validated;

pub use classify::{classify, required_kind, RequiredKind};
pub use coded_enum::UNKNOWN_CODE_MESSAGE;
pub use plan::{resolve, CodedEnumPlan, ConvertiblePlan, JsonPlan, Plan};
pub use validated::VALIDATED_MARKER;

use crate::ast::CapabilityKind;
use crate::builders::BuilderError;
use crate::error_reporting::{Diagnostic, DiagnosticReporter};
use crate::host::DeclarationHost;
use crate::tags::CapabilityTag;
use itertools::Itertools;

/// Errors that abort processing of a single tag.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Wrong declaration kind for the capability.
    #[error("@{tag} is only supported on {required}.")]
    InvalidTarget {
        tag: &'static str,
        required: RequiredKind,
    },

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Terminal disposition of one processed tag: `Rejected` (error emitted, no
/// members injected) or `Done`. Nothing persists past the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Rejected,
    Done,
}

/// Counts for one processed tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagStats {
    pub injected: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagOutcome {
    pub capability: CapabilityKind,
    pub state: PassState,
    pub stats: TagStats,
}

/// Result of one synthesis pass over a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub outcomes: Vec<TagOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PassReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == crate::error_reporting::Severity::Error)
    }

    pub fn injected(&self) -> usize {
        self.outcomes.iter().map(|o| o.stats.injected).sum()
    }
}

/// Runs one synthesis pass: drains the declaration's tags (tags are not
/// visible after consumption) and processes each in attachment order.
pub fn run_pass<H: DeclarationHost>(host: &mut H) -> PassReport {
    let mut reporter = DiagnosticReporter::new();
    let tags = host.take_tags();
    log::debug!(
        "synthesis pass over '{}': {} tag(s)",
        host.name(),
        tags.len()
    );

    let outcomes: Vec<TagOutcome> = tags
        .iter()
        .map(|tag| process_tag(host, tag, &mut reporter))
        .collect();

    log::debug!(
        "pass over '{}' finished: {}",
        host.name(),
        outcomes
            .iter()
            .map(|o| format!(
                "@{} {:?} (+{}/-{})",
                o.capability.tag_name(),
                o.state,
                o.stats.injected,
                o.stats.skipped
            ))
            .join(", ")
    );

    PassReport {
        outcomes,
        diagnostics: reporter.into_diagnostics(),
    }
}

/// Processes a single tag against the declaration. Classification failure
/// rejects the tag before any synthesis; a member conflict skips only that
/// member and siblings proceed.
pub fn process_tag<H: DeclarationHost>(
    host: &mut H,
    tag: &CapabilityTag,
    reporter: &mut DiagnosticReporter,
) -> TagOutcome {
    let capability = tag.kind();
    log::trace!("@{}: classifying", capability.tag_name());

    if let Err(err) = classify::classify(host.kind(), capability) {
        reporter.error(&tag.span, &err.to_string());
        log::debug!("@{}: rejected ({})", capability.tag_name(), err);
        return TagOutcome {
            capability,
            state: PassState::Rejected,
            stats: TagStats::default(),
        };
    }

    log::trace!("@{}: configuring", capability.tag_name());
    let plan = plan::resolve(&tag.capability);

    log::trace!("@{}: synthesizing", capability.tag_name());
    let result = match &plan {
        Plan::Convertible(p) => convertible::apply(host, p, &tag.span, reporter),
        Plan::Json(p) => json::apply(host, p, &tag.span, reporter),
        Plan::CodedEnum(p) => coded_enum::apply(host, p, &tag.span, reporter),
        Plan::Validated => Ok(validated::apply(host)),
    };

    match result {
        Ok(stats) => TagOutcome {
            capability,
            state: PassState::Done,
            stats,
        },
        Err(err) => {
            reporter.error(&tag.span, &err.to_string());
            TagOutcome {
                capability,
                state: PassState::Rejected,
                stats: TagStats::default(),
            }
        }
    }
}
