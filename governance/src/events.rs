//! Governance event types and attribute keys.

pub const ATTRIBUTE_VALUE_CATEGORY: &str = "governance";
pub const ATTRIBUTE_TX_HASH: &str = "txHash";

pub const EVENT_TYPE_SUBMIT_PROPOSAL: &str = "submit_proposal";
pub const EVENT_TYPE_PROPOSAL_DEPOSIT: &str = "proposal_deposit";
pub const EVENT_TYPE_PROPOSAL_VOTE: &str = "proposal_vote";
pub const EVENT_TYPE_INACTIVE_PROPOSAL: &str = "inactive_proposal";
pub const EVENT_TYPE_ACTIVE_PROPOSAL: &str = "active_proposal";

pub const ATTRIBUTE_KEY_PROPOSAL_ID: &str = "proposal_id";
pub const ATTRIBUTE_KEY_PROPOSAL_TYPE: &str = "proposal_type";
pub const ATTRIBUTE_KEY_VOTING_PERIOD_START: &str = "voting_period_start";
pub const ATTRIBUTE_KEY_OPTION: &str = "option";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";
pub const ATTRIBUTE_KEY_PROPOSAL_RESULT: &str = "proposal_result";

pub const ATTRIBUTE_VALUE_PROPOSAL_DROPPED: &str = "proposal_dropped";
pub const ATTRIBUTE_VALUE_PROPOSAL_PASSED: &str = "proposal_passed";
pub const ATTRIBUTE_VALUE_PROPOSAL_REJECTED: &str = "proposal_rejected";
pub const ATTRIBUTE_VALUE_PROPOSAL_FAILED: &str = "proposal_failed";
