// Member injection.
// Appends a synthesized descriptor to the declaration, stamping the
// generated-by provenance so downstream tooling and repeated passes can
// tell synthetic members from authored ones. Filtering against existing
// members happens in the calling sequence, not here.

use crate::ast::{CapabilityKind, Member, Provenance};
use crate::host::DeclarationHost;

pub(crate) fn inject<H: DeclarationHost>(host: &mut H, mut member: Member, capability: CapabilityKind) {
    if member.provenance().is_none() {
        member.set_provenance(Provenance { capability });
    }
    log::debug!(
        "injecting {} '{}' into '{}' (@{})",
        describe(&member),
        member.name(),
        host.name(),
        capability.tag_name()
    );
    host.inject(member);
}

fn describe(member: &Member) -> &'static str {
    match member {
        Member::Method(_) => "method",
        Member::Constructor(_) => "constructor",
        Member::Field(_) => "field",
    }
}
