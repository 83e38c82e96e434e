// Validated: attaches a validation marker to every parameter of every
// non-constructor method. Produces no members; mutates parameter metadata
// only. Methods named like the declaration itself are skipped, guarding
// against a constructor written in constructor-call style.

use super::TagStats;
use crate::host::DeclarationHost;

/// Fully-qualified marker attached to each parameter.
pub const VALIDATED_MARKER: &str = "org.springframework.validation.annotation.Validated";

pub(crate) fn apply<H: DeclarationHost>(host: &mut H) -> TagStats {
    let own_name = host.name().to_string();
    for sig in host.method_signatures() {
        if sig.name == own_name {
            continue;
        }
        log::trace!(
            "marking parameters of '{}/{}' in '{}'",
            sig.name,
            sig.arity,
            own_name
        );
        host.attach_parameter_marker(&sig.name, sig.arity, VALIDATED_MARKER);
    }
    TagStats::default()
}
