//! End-of-block processing: expire deposit periods and close votes.

use shentu_types::{Context, Event};

use crate::error::GovError;
use crate::events::*;
use crate::keeper::GovKeeper;
use crate::proposal::ProposalStatus;
use crate::proposal_handler::execute_proposal;
use crate::tally::tally;

/// Run the governance end-blocker at `ctx.time`.
///
/// Proposals still collecting deposits past their deadline are deleted and
/// their deposits burned. Proposals whose voting period ended are tallied,
/// their deposits refunded or burned, and passed content is executed.
pub fn end_blocker(ctx: &mut Context, keeper: &GovKeeper) -> Result<(), GovError> {
    for id in keeper.inactive_proposals_due(ctx.time)? {
        let Some(proposal) = keeper.proposal(id)? else {
            tracing::warn!(proposal_id = id, "inactive queue entry without proposal");
            continue;
        };
        keeper.remove_inactive_queue(proposal.deposit_end_time, id)?;
        keeper.burn_deposits(id)?;
        keeper.delete_proposal(id)?;

        ctx.events.emit(
            Event::new(EVENT_TYPE_INACTIVE_PROPOSAL)
                .with(ATTRIBUTE_KEY_PROPOSAL_ID, id.to_string())
                .with(ATTRIBUTE_KEY_PROPOSAL_RESULT, ATTRIBUTE_VALUE_PROPOSAL_DROPPED),
        );
        tracing::info!(
            proposal_id = id,
            title = proposal.content.title(),
            min_deposit = %keeper.params()?.deposit.min_deposit,
            total_deposit = %proposal.total_deposit,
            "proposal dropped: deposit period ended without reaching minimum"
        );
    }

    for id in keeper.active_proposals_due(ctx.time)? {
        let Some(mut proposal) = keeper.proposal(id)? else {
            tracing::warn!(proposal_id = id, "active queue entry without proposal");
            continue;
        };
        let outcome = tally(keeper, &proposal)?;

        if outcome.burn_deposits {
            keeper.burn_deposits(id)?;
        } else {
            keeper.refund_deposits(id)?;
        }

        let result = if outcome.passes {
            match execute_proposal(ctx, keeper, &proposal.content) {
                Ok(()) => {
                    proposal.status = ProposalStatus::Passed;
                    ATTRIBUTE_VALUE_PROPOSAL_PASSED
                }
                Err(err) => {
                    tracing::warn!(proposal_id = id, error = %err, "passed proposal failed to execute");
                    proposal.status = ProposalStatus::Failed;
                    ATTRIBUTE_VALUE_PROPOSAL_FAILED
                }
            }
        } else {
            proposal.status = ProposalStatus::Rejected;
            ATTRIBUTE_VALUE_PROPOSAL_REJECTED
        };

        proposal.final_tally = outcome.result;
        keeper.set_proposal(&proposal)?;
        keeper.delete_votes(id)?;
        if let Some(end) = proposal.voting_end_time {
            keeper.remove_active_queue(end, id)?;
        }

        ctx.events.emit(
            Event::new(EVENT_TYPE_ACTIVE_PROPOSAL)
                .with(ATTRIBUTE_KEY_PROPOSAL_ID, id.to_string())
                .with(ATTRIBUTE_KEY_PROPOSAL_RESULT, result),
        );
        tracing::info!(proposal_id = id, result, "proposal tallied");
    }
    Ok(())
}
