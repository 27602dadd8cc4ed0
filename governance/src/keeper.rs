//! Governance keeper: proposal, deposit and vote state.

use std::sync::Arc;

use shentu_bank::BankKeeper;
use shentu_cert::CertKeeper;
use shentu_store::prefix::key;
use shentu_store::{KvStore, PrefixStore};
use shentu_types::{AccAddress, Coins, Context, Event, Timestamp};
use shentu_upgrade::UpgradeKeeper;

use crate::error::GovError;
use crate::events::{
    ATTRIBUTE_KEY_AMOUNT, ATTRIBUTE_KEY_OPTION, ATTRIBUTE_KEY_PROPOSAL_ID,
    EVENT_TYPE_PROPOSAL_DEPOSIT, EVENT_TYPE_PROPOSAL_VOTE,
};
use crate::expected::StakingKeeper;
use crate::params::GovParams;
use crate::proposal::{proposal_id_bytes, Proposal, ProposalContent, ProposalStatus};
use crate::vote::{Deposit, TallyResult, Vote, VoteOption};
use crate::MODULE_NAME;

const PARAMS_KEY: &[u8] = b"params";
const NEXT_ID_KEY: &[u8] = b"next_id";
const PROPOSAL_PREFIX: &[u8] = b"proposal/";
const INACTIVE_QUEUE_PREFIX: &[u8] = b"inactive/";
const ACTIVE_QUEUE_PREFIX: &[u8] = b"active/";
const DEPOSIT_PREFIX: &[u8] = b"deposit/";
const VOTE_PREFIX: &[u8] = b"vote/";

fn proposal_key(id: u64) -> Vec<u8> {
    key(&[PROPOSAL_PREFIX, &proposal_id_bytes(id)])
}

fn queue_key(prefix: &[u8], end: Timestamp, id: u64) -> Vec<u8> {
    key(&[prefix, &end.as_secs().to_be_bytes(), &proposal_id_bytes(id)])
}

fn deposit_key(id: u64, depositor: &AccAddress) -> Vec<u8> {
    key(&[DEPOSIT_PREFIX, &proposal_id_bytes(id), depositor.as_bytes()])
}

fn vote_key(id: u64, voter: &AccAddress) -> Vec<u8> {
    key(&[VOTE_PREFIX, &proposal_id_bytes(id), voter.as_bytes()])
}

/// Decode the end time from a queue key (the 8 bytes after the prefix).
fn queue_end_time(prefix: &[u8], k: &[u8]) -> Option<u64> {
    let raw = k.get(prefix.len()..prefix.len() + 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(raw);
    Some(u64::from_be_bytes(buf))
}

/// Owns governance state and the calls into the bank, cert and upgrade keepers.
#[derive(Clone)]
pub struct GovKeeper {
    store: PrefixStore,
    pub bank_keeper: BankKeeper,
    pub cert_keeper: CertKeeper,
    pub upgrade_keeper: UpgradeKeeper,
    staking: Arc<dyn StakingKeeper>,
}

impl GovKeeper {
    pub fn new(
        backend: Arc<dyn KvStore>,
        bank_keeper: BankKeeper,
        cert_keeper: CertKeeper,
        upgrade_keeper: UpgradeKeeper,
        staking: Arc<dyn StakingKeeper>,
    ) -> Self {
        Self {
            store: PrefixStore::new(backend, MODULE_NAME),
            bank_keeper,
            cert_keeper,
            upgrade_keeper,
            staking,
        }
    }

    pub fn staking(&self) -> &dyn StakingKeeper {
        self.staking.as_ref()
    }

    // ── Params ─────────────────────────────────────────────────────────

    pub fn params(&self) -> Result<GovParams, GovError> {
        Ok(self.store.get_value(PARAMS_KEY)?.unwrap_or_default())
    }

    pub fn set_params(&self, params: &GovParams) -> Result<(), GovError> {
        params.validate()?;
        Ok(self.store.put_value(PARAMS_KEY, params)?)
    }

    // ── Council ────────────────────────────────────────────────────────

    pub fn is_certifier(&self, address: &AccAddress) -> Result<bool, GovError> {
        Ok(self.cert_keeper.is_certifier(address)?)
    }

    /// Council members are the certifiers.
    pub fn is_council_member(&self, address: &AccAddress) -> Result<bool, GovError> {
        self.is_certifier(address)
    }

    // ── Proposals ──────────────────────────────────────────────────────

    pub fn next_proposal_id(&self) -> Result<u64, GovError> {
        Ok(self.store.get_value(NEXT_ID_KEY)?.unwrap_or(1))
    }

    pub fn set_next_proposal_id(&self, id: u64) -> Result<(), GovError> {
        Ok(self.store.put_value(NEXT_ID_KEY, &id)?)
    }

    pub fn proposal(&self, id: u64) -> Result<Option<Proposal>, GovError> {
        Ok(self.store.get_value(&proposal_key(id))?)
    }

    pub fn set_proposal(&self, proposal: &Proposal) -> Result<(), GovError> {
        Ok(self.store.put_value(&proposal_key(proposal.id), proposal)?)
    }

    pub fn delete_proposal(&self, id: u64) -> Result<(), GovError> {
        Ok(self.store.delete(&proposal_key(id))?)
    }

    /// All proposals in id order.
    pub fn proposals(&self) -> Result<Vec<Proposal>, GovError> {
        Ok(self.store.scan_values(PROPOSAL_PREFIX)?)
    }

    /// Store a new proposal in the deposit period.
    pub fn submit_proposal(
        &self,
        ctx: &Context,
        content: ProposalContent,
        proposer: AccAddress,
    ) -> Result<Proposal, GovError> {
        content.validate_basic()?;
        let id = self.next_proposal_id()?;
        let params = self.params()?;
        let proposal = Proposal {
            id,
            content,
            status: ProposalStatus::DepositPeriod,
            final_tally: TallyResult::default(),
            submit_time: ctx.time,
            deposit_end_time: ctx.time.add_secs(params.deposit.max_deposit_period_secs),
            total_deposit: Coins::empty(),
            voting_start_time: None,
            voting_end_time: None,
            proposer,
        };
        self.set_proposal(&proposal)?;
        self.insert_inactive_queue(proposal.deposit_end_time, id)?;
        self.set_next_proposal_id(id + 1)?;
        tracing::info!(
            proposal_id = id,
            proposal_type = proposal.content.proposal_type(),
            %proposer,
            "proposal submitted"
        );
        Ok(proposal)
    }

    /// Move a proposal from the deposit period into the voting period.
    pub fn activate_voting_period(
        &self,
        ctx: &Context,
        proposal: &mut Proposal,
    ) -> Result<(), GovError> {
        let params = self.params()?;
        let end = ctx.time.add_secs(params.voting.voting_period_secs);
        self.remove_inactive_queue(proposal.deposit_end_time, proposal.id)?;
        proposal.status = ProposalStatus::VotingPeriod;
        proposal.voting_start_time = Some(ctx.time);
        proposal.voting_end_time = Some(end);
        self.set_proposal(proposal)?;
        self.insert_active_queue(end, proposal.id)?;
        tracing::info!(proposal_id = proposal.id, voting_end = %end, "voting period activated");
        Ok(())
    }

    /// Skip the deposit period for proposals submitted by council members.
    ///
    /// Returns whether the voting period was activated.
    pub fn activate_council_proposal_voting_period(
        &self,
        ctx: &Context,
        proposal: &mut Proposal,
    ) -> Result<bool, GovError> {
        if !self.is_council_member(&proposal.proposer)? {
            return Ok(false);
        }
        self.activate_voting_period(ctx, proposal)?;
        Ok(true)
    }

    // ── Deposits ───────────────────────────────────────────────────────

    pub fn deposit(&self, id: u64, depositor: &AccAddress) -> Result<Option<Deposit>, GovError> {
        Ok(self.store.get_value(&deposit_key(id, depositor))?)
    }

    pub fn set_deposit(&self, deposit: &Deposit) -> Result<(), GovError> {
        Ok(self
            .store
            .put_value(&deposit_key(deposit.proposal_id, &deposit.depositor), deposit)?)
    }

    pub fn deposits(&self, id: u64) -> Result<Vec<Deposit>, GovError> {
        Ok(self
            .store
            .scan_values(&key(&[DEPOSIT_PREFIX, &proposal_id_bytes(id)]))?)
    }

    pub fn all_deposits(&self) -> Result<Vec<Deposit>, GovError> {
        Ok(self.store.scan_values(DEPOSIT_PREFIX)?)
    }

    /// Escrow `amount` from `depositor` on proposal `id`.
    ///
    /// Returns `true` when this deposit moved the proposal into the voting period.
    pub fn add_deposit(
        &self,
        ctx: &mut Context,
        id: u64,
        depositor: AccAddress,
        amount: Coins,
    ) -> Result<bool, GovError> {
        let mut proposal = self.proposal(id)?.ok_or(GovError::UnknownProposal(id))?;
        if !proposal.status.accepts_deposits() {
            return Err(GovError::InactiveProposal(id));
        }
        amount.validate()?;

        self.bank_keeper
            .send_to_module(&depositor, MODULE_NAME, &amount)?;

        proposal.total_deposit = proposal
            .total_deposit
            .checked_add(&amount)
            .ok_or_else(|| GovError::InvalidMessage("deposit overflow".to_string()))?;
        self.set_proposal(&proposal)?;

        let min_deposit = self.params()?.deposit.min_deposit;
        let mut activated = false;
        if proposal.status == ProposalStatus::DepositPeriod
            && proposal.total_deposit.is_all_gte(&min_deposit)
        {
            self.activate_voting_period(ctx, &mut proposal)?;
            activated = true;
        }

        let deposit = match self.deposit(id, &depositor)? {
            Some(mut existing) => {
                existing.amount = existing
                    .amount
                    .checked_add(&amount)
                    .ok_or_else(|| GovError::InvalidMessage("deposit overflow".to_string()))?;
                existing
            }
            None => Deposit {
                proposal_id: id,
                depositor,
                amount: amount.clone(),
            },
        };
        self.set_deposit(&deposit)?;

        ctx.events.emit(
            Event::new(EVENT_TYPE_PROPOSAL_DEPOSIT)
                .with(ATTRIBUTE_KEY_AMOUNT, amount.to_string())
                .with(ATTRIBUTE_KEY_PROPOSAL_ID, id.to_string()),
        );
        tracing::debug!(proposal_id = id, %depositor, %amount, activated, "deposit added");
        Ok(activated)
    }

    /// Return every deposit on `id` to its depositor and delete the records.
    pub fn refund_deposits(&self, id: u64) -> Result<(), GovError> {
        for deposit in self.deposits(id)? {
            self.bank_keeper
                .send_from_module(MODULE_NAME, &deposit.depositor, &deposit.amount)?;
            self.store.delete(&deposit_key(id, &deposit.depositor))?;
        }
        Ok(())
    }

    /// Burn every deposit on `id` and delete the records.
    pub fn burn_deposits(&self, id: u64) -> Result<(), GovError> {
        for deposit in self.deposits(id)? {
            self.bank_keeper
                .burn_from_module(MODULE_NAME, &deposit.amount)?;
            self.store.delete(&deposit_key(id, &deposit.depositor))?;
        }
        Ok(())
    }

    // ── Votes ──────────────────────────────────────────────────────────

    /// Record a vote. A later vote by the same voter replaces the earlier one.
    pub fn add_vote(
        &self,
        ctx: &mut Context,
        id: u64,
        voter: AccAddress,
        option: VoteOption,
    ) -> Result<(), GovError> {
        let proposal = self.proposal(id)?.ok_or(GovError::UnknownProposal(id))?;
        if proposal.status != ProposalStatus::VotingPeriod {
            return Err(GovError::InactiveProposal(id));
        }
        let vote = Vote {
            proposal_id: id,
            voter,
            option,
        };
        self.set_vote(&vote)?;

        ctx.events.emit(
            Event::new(EVENT_TYPE_PROPOSAL_VOTE)
                .with(ATTRIBUTE_KEY_OPTION, option.to_string())
                .with(ATTRIBUTE_KEY_PROPOSAL_ID, id.to_string()),
        );
        tracing::debug!(proposal_id = id, %voter, %option, "vote recorded");
        Ok(())
    }

    pub fn set_vote(&self, vote: &Vote) -> Result<(), GovError> {
        Ok(self
            .store
            .put_value(&vote_key(vote.proposal_id, &vote.voter), vote)?)
    }

    pub fn vote(&self, id: u64, voter: &AccAddress) -> Result<Option<Vote>, GovError> {
        Ok(self.store.get_value(&vote_key(id, voter))?)
    }

    pub fn votes(&self, id: u64) -> Result<Vec<Vote>, GovError> {
        Ok(self
            .store
            .scan_values(&key(&[VOTE_PREFIX, &proposal_id_bytes(id)]))?)
    }

    pub fn all_votes(&self) -> Result<Vec<Vote>, GovError> {
        Ok(self.store.scan_values(VOTE_PREFIX)?)
    }

    pub fn delete_votes(&self, id: u64) -> Result<(), GovError> {
        for vote in self.votes(id)? {
            self.store.delete(&vote_key(id, &vote.voter))?;
        }
        Ok(())
    }

    // ── Queues ─────────────────────────────────────────────────────────

    pub fn insert_inactive_queue(&self, end: Timestamp, id: u64) -> Result<(), GovError> {
        Ok(self
            .store
            .put_value(&queue_key(INACTIVE_QUEUE_PREFIX, end, id), &id)?)
    }

    pub fn remove_inactive_queue(&self, end: Timestamp, id: u64) -> Result<(), GovError> {
        Ok(self.store.delete(&queue_key(INACTIVE_QUEUE_PREFIX, end, id))?)
    }

    pub fn insert_active_queue(&self, end: Timestamp, id: u64) -> Result<(), GovError> {
        Ok(self
            .store
            .put_value(&queue_key(ACTIVE_QUEUE_PREFIX, end, id), &id)?)
    }

    pub fn remove_active_queue(&self, end: Timestamp, id: u64) -> Result<(), GovError> {
        Ok(self.store.delete(&queue_key(ACTIVE_QUEUE_PREFIX, end, id))?)
    }

    fn due(&self, prefix: &[u8], now: Timestamp) -> Result<Vec<u64>, GovError> {
        let mut ids = Vec::new();
        for (k, v) in self.store.scan_raw(prefix)? {
            match queue_end_time(prefix, &k) {
                Some(end) if end <= now.as_secs() => {
                    ids.push(shentu_store::prefix::decode::<u64>(&v)?);
                }
                // Keys are ordered by end time, so nothing later is due.
                _ => break,
            }
        }
        Ok(ids)
    }

    /// Proposals whose deposit period ended at or before `now`, oldest first.
    pub fn inactive_proposals_due(&self, now: Timestamp) -> Result<Vec<u64>, GovError> {
        self.due(INACTIVE_QUEUE_PREFIX, now)
    }

    /// Proposals whose voting period ended at or before `now`, oldest first.
    pub fn active_proposals_due(&self, now: Timestamp) -> Result<Vec<u64>, GovError> {
        self.due(ACTIVE_QUEUE_PREFIX, now)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use shentu_cert::Certifier;
    use shentu_store::MemoryStore;
    use shentu_types::{Coin, MICRO_CTK_DENOM};

    pub fn addr(seed: u8) -> AccAddress {
        AccAddress::new([seed; 20])
    }

    pub fn uctk(amount: u128) -> Coins {
        Coins::from_coin(Coin::uctk(amount))
    }

    pub fn ctx_at(height: u64, secs: u64) -> Context {
        Context::new("shentu-test", height, Timestamp::new(secs))
    }

    pub fn text(title: &str) -> ProposalContent {
        ProposalContent::Text {
            title: title.to_string(),
            description: "description".to_string(),
        }
    }

    /// Keeper over a fresh store: small min deposit (100uctk), one-day
    /// periods, certifier `addr(9)`, and 1_000uctk for `addr(1)..=addr(4)`.
    pub fn keeper() -> GovKeeper {
        let backend: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let bank = BankKeeper::new(backend.clone()).with_module_accounts([MODULE_NAME]);
        let cert = CertKeeper::new(backend.clone());
        let upgrade = UpgradeKeeper::new(backend.clone());
        let keeper = GovKeeper::new(
            backend,
            bank.clone(),
            cert.clone(),
            upgrade,
            Arc::new(bank.clone()),
        );
        let mut params = GovParams::default();
        params.deposit.min_deposit = uctk(100);
        params.deposit.max_deposit_period_secs = 86_400;
        params.voting.voting_period_secs = 86_400;
        keeper.set_params(&params).unwrap();
        cert.set_certifier(&Certifier {
            address: addr(9),
            alias: "council".to_string(),
            proposer: AccAddress::ZERO,
            description: String::new(),
        })
        .unwrap();
        for seed in 1..=4 {
            bank.set_balance(&addr(seed), MICRO_CTK_DENOM, 1_000).unwrap();
        }
        keeper
    }
}
