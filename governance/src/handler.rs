//! Governance message handler.

use shentu_cert::{AddOrRemove, CertError};
use shentu_types::event::{ATTRIBUTE_KEY_MODULE, ATTRIBUTE_KEY_SENDER, EVENT_TYPE_MESSAGE};
use shentu_types::{Context, Event, HandlerResult, MICRO_CTK_DENOM};

use crate::error::GovError;
use crate::events::*;
use crate::keeper::GovKeeper;
use crate::msgs::{GovMsg, MsgDeposit, MsgSubmitProposal, MsgVote};
use crate::proposal::{proposal_id_bytes, ProposalContent};

/// Handle one governance message.
pub fn handle(
    ctx: &mut Context,
    keeper: &GovKeeper,
    msg: &GovMsg,
) -> Result<HandlerResult, GovError> {
    match msg {
        GovMsg::Deposit(m) => handle_msg_deposit(ctx, keeper, m),
        GovMsg::SubmitProposal(m) => handle_msg_submit_proposal(ctx, keeper, m),
        GovMsg::Vote(m) => handle_msg_vote(ctx, keeper, m),
    }
}

fn handle_msg_deposit(
    ctx: &mut Context,
    keeper: &GovKeeper,
    msg: &MsgDeposit,
) -> Result<HandlerResult, GovError> {
    let voting_started =
        keeper.add_deposit(ctx, msg.proposal_id, msg.depositor, msg.amount.clone())?;

    let tx_hash = ctx.tx_hash().to_string();
    ctx.events.emit(
        Event::new(EVENT_TYPE_MESSAGE)
            .with(ATTRIBUTE_KEY_MODULE, ATTRIBUTE_VALUE_CATEGORY)
            .with(ATTRIBUTE_KEY_SENDER, msg.depositor.to_string())
            .with(ATTRIBUTE_TX_HASH, tx_hash),
    );

    if voting_started {
        ctx.events.emit(
            Event::new(EVENT_TYPE_PROPOSAL_DEPOSIT)
                .with(ATTRIBUTE_KEY_VOTING_PERIOD_START, msg.proposal_id.to_string()),
        );
    }

    Ok(HandlerResult::with_events(ctx.events.events().to_vec()))
}

fn handle_msg_submit_proposal(
    ctx: &mut Context,
    keeper: &GovKeeper,
    msg: &MsgSubmitProposal,
) -> Result<HandlerResult, GovError> {
    let initial = msg.initial_deposit.amount_of(MICRO_CTK_DENOM);
    let minimum = keeper
        .params()?
        .deposit
        .min_initial_deposit
        .amount_of(MICRO_CTK_DENOM);
    if initial < minimum && !keeper.is_council_member(&msg.proposer)? {
        return Err(GovError::InsufficientInitialDeposit { initial, minimum });
    }

    validate_proposal_by_type(ctx, keeper, msg)?;

    let mut proposal = keeper.submit_proposal(ctx, msg.content.clone(), msg.proposer)?;

    // Council members skip the deposit period; everyone else deposits the
    // initial amount, which may itself open voting.
    let mut voting_started = keeper.activate_council_proposal_voting_period(ctx, &mut proposal)?;
    if !voting_started {
        voting_started =
            keeper.add_deposit(ctx, proposal.id, msg.proposer, msg.initial_deposit.clone())?;
    }

    ctx.events.emit(
        Event::new(EVENT_TYPE_MESSAGE)
            .with(ATTRIBUTE_KEY_MODULE, ATTRIBUTE_VALUE_CATEGORY)
            .with(ATTRIBUTE_KEY_SENDER, msg.proposer.to_string()),
    );

    let mut submit_event = Event::new(EVENT_TYPE_SUBMIT_PROPOSAL)
        .with(ATTRIBUTE_KEY_PROPOSAL_TYPE, msg.content.proposal_type())
        .with(ATTRIBUTE_KEY_PROPOSAL_ID, proposal.id.to_string());
    if voting_started {
        submit_event = submit_event.with(ATTRIBUTE_KEY_VOTING_PERIOD_START, proposal.id.to_string());
    }
    ctx.events.emit(submit_event);

    Ok(HandlerResult {
        data: proposal_id_bytes(proposal.id).to_vec(),
        events: ctx.events.events().to_vec(),
    })
}

/// Checks that depend on the kind of proposal and on current state.
fn validate_proposal_by_type(
    ctx: &Context,
    keeper: &GovKeeper,
    msg: &MsgSubmitProposal,
) -> Result<(), GovError> {
    match &msg.content {
        ProposalContent::CertifierUpdate(c) => {
            if !keeper.is_certifier(&msg.proposer)? {
                return Err(CertError::UnqualifiedCertifier(msg.proposer).into());
            }
            let is_certifier = keeper.is_certifier(&c.certifier)?;
            if c.add_or_remove == AddOrRemove::Add && is_certifier {
                return Err(CertError::CertifierAlreadyExists.into());
            }
            if c.add_or_remove == AddOrRemove::Remove && !is_certifier {
                return Err(CertError::UnqualifiedCertifier(c.certifier).into());
            }
            if !c.alias.is_empty() && keeper.cert_keeper.has_certifier_alias(&c.alias)? {
                return Err(CertError::RepeatedAlias.into());
            }
            Ok(())
        }
        ProposalContent::SoftwareUpgrade(p) => {
            Ok(keeper.upgrade_keeper.validate_plan(ctx, &p.plan)?)
        }
        ProposalContent::Text { .. } | ProposalContent::CancelSoftwareUpgrade(_) => Ok(()),
    }
}

fn handle_msg_vote(
    ctx: &mut Context,
    keeper: &GovKeeper,
    msg: &MsgVote,
) -> Result<HandlerResult, GovError> {
    keeper.add_vote(ctx, msg.proposal_id, msg.voter, msg.option)?;

    ctx.events.emit(
        Event::new(EVENT_TYPE_MESSAGE)
            .with(ATTRIBUTE_KEY_MODULE, ATTRIBUTE_VALUE_CATEGORY)
            .with(ATTRIBUTE_KEY_SENDER, msg.voter.to_string()),
    );

    Ok(HandlerResult::with_events(ctx.events.events().to_vec()))
}
