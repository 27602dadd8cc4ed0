//! Vote tallying.

use crate::error::GovError;
use crate::keeper::GovKeeper;
use crate::params::TallyParams;
use crate::proposal::Proposal;
use crate::vote::TallyResult;

const BPS: u128 = 10_000;

/// Outcome of counting the votes on one proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyOutcome {
    pub passes: bool,
    pub burn_deposits: bool,
    pub result: TallyResult,
}

/// `part / whole > bps / 10_000` in integer arithmetic.
fn exceeds(part: u128, whole: u128, bps: u32) -> bool {
    part.saturating_mul(BPS) > whole.saturating_mul(u128::from(bps))
}

/// Decide a proposal from already weighted votes.
///
/// - no voting power in existence: fail, refund;
/// - turnout below quorum: fail, burn;
/// - everyone abstained: fail, refund;
/// - vetoed: fail, burn;
/// - Yes above threshold of non-abstaining power: pass, refund;
/// - otherwise: fail, refund.
pub fn decide(result: TallyResult, total_power: u128, params: &TallyParams) -> TallyOutcome {
    let outcome = |passes, burn_deposits, result| TallyOutcome {
        passes,
        burn_deposits,
        result,
    };
    if total_power == 0 {
        return outcome(false, false, result);
    }
    let voted = result.total();
    if voted.saturating_mul(BPS) < total_power.saturating_mul(u128::from(params.quorum_bps)) {
        return outcome(false, true, result);
    }
    let non_abstain = voted - result.abstain;
    if non_abstain == 0 {
        return outcome(false, false, result);
    }
    if exceeds(result.no_with_veto, voted, params.veto_bps) {
        return outcome(false, true, result);
    }
    if exceeds(result.yes, non_abstain, params.threshold_bps) {
        return outcome(true, false, result);
    }
    outcome(false, false, result)
}

/// Weigh every vote on `proposal` by the voter's power and decide it.
pub fn tally(keeper: &GovKeeper, proposal: &Proposal) -> Result<TallyOutcome, GovError> {
    let staking = keeper.staking();
    let mut result = TallyResult::default();
    for vote in keeper.votes(proposal.id)? {
        result.add(vote.option, staking.voting_power(&vote.voter)?);
    }
    let total = staking.total_voting_power()?;
    let params = keeper.params()?.tally;
    let outcome = decide(result, total, &params);
    tracing::debug!(
        proposal_id = proposal.id,
        total_power = total,
        passes = outcome.passes,
        burn = outcome.burn_deposits,
        "proposal tallied"
    );
    Ok(outcome)
}
