//! Applies the content of passed proposals.

use shentu_types::Context;

use crate::error::GovError;
use crate::keeper::GovKeeper;
use crate::proposal::ProposalContent;

/// Execute a passed proposal's content against the owning keeper.
///
/// Each branch checks its preconditions before writing, so an error leaves
/// state untouched.
pub fn execute_proposal(
    ctx: &Context,
    keeper: &GovKeeper,
    content: &ProposalContent,
) -> Result<(), GovError> {
    match content {
        ProposalContent::Text { .. } => Ok(()),
        ProposalContent::CertifierUpdate(p) => Ok(p.execute(&keeper.cert_keeper)?),
        ProposalContent::SoftwareUpgrade(p) => Ok(p.execute(ctx, &keeper.upgrade_keeper)?),
        ProposalContent::CancelSoftwareUpgrade(p) => Ok(p.execute(&keeper.upgrade_keeper)?),
    }
}
