//! End-to-end tests driving `ShentuApp` through genesis, transactions and
//! block boundaries, checking the state every module ends up in.

use serde::Serialize;
use serde_json::{json, Value};

use shentu_bank::{Balance, BankGenesis, BankKeeper, MsgSend};
use shentu_cert::{AddOrRemove, CertGenesis, Certifier, CertifierUpdateProposal};
use shentu_cvm::{Contract, GenesisState as CvmGenesis, StorageEntry, Word256};
use shentu_governance::{
    GovGenesis, GovParams, MsgDeposit, MsgSubmitProposal, MsgVote, ProposalContent,
    ProposalStatus, VoteOption,
};
use shentu_node::tx::{CODE_INSUFFICIENT_FUNDS, CODE_UNAUTHORIZED, CODE_UNKNOWN_REQUEST};
use shentu_node::{AppGenesis, AppState, Block, NodeConfig, NodeError, ShentuApp, TxResponse};
use shentu_types::{AccAddress, Coin, Coins, Event, Timestamp, MICRO_CTK_DENOM};
use shentu_upgrade::{Plan, SoftwareUpgradeProposal, UpgradeError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CHAIN_ID: &str = "shentu-test";
const GENESIS_TIME: u64 = 1_600_000_000;
const DAY: u64 = 86_400;
const CERTIFIER: u8 = 9;

fn addr(seed: u8) -> AccAddress {
    AccAddress::new([seed; 20])
}

fn uctk(amount: u128) -> Coins {
    Coins::from_coin(Coin::uctk(amount))
}

fn config() -> NodeConfig {
    NodeConfig {
        chain_id: CHAIN_ID.to_string(),
        ..NodeConfig::default()
    }
}

/// 1_000uctk for `addr(1)..=addr(3)` and the certifier, a 100uctk minimum
/// deposit and one-day deposit and voting periods.
fn genesis() -> AppGenesis {
    let mut params = GovParams::default();
    params.deposit.min_deposit = uctk(100);
    params.deposit.max_deposit_period_secs = DAY;
    params.voting.voting_period_secs = DAY;

    AppGenesis {
        chain_id: CHAIN_ID.to_string(),
        genesis_time: Timestamp::new(GENESIS_TIME),
        app_state: AppState {
            bank: BankGenesis {
                balances: [1, 2, 3, CERTIFIER]
                    .into_iter()
                    .map(|seed| Balance {
                        address: addr(seed),
                        coins: uctk(1_000),
                    })
                    .collect(),
            },
            cert: CertGenesis {
                certifiers: vec![Certifier {
                    address: addr(CERTIFIER),
                    alias: "council".to_string(),
                    proposer: AccAddress::ZERO,
                    description: String::new(),
                }],
            },
            gov: GovGenesis {
                params,
                ..GovGenesis::default()
            },
            cvm: CvmGenesis::default(),
        },
    }
}

fn app() -> ShentuApp {
    let mut app = ShentuApp::new(config());
    app.init_chain(&genesis()).expect("genesis imports");
    app
}

fn msg(kind: &str, value: impl Serialize) -> Value {
    json!({ "type": kind, "value": value })
}

/// A transaction signed by `addr(signer)`.
fn tx(signer: u8, msgs: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({ "signer": addr(signer), "msgs": msgs })).expect("tx encodes")
}

fn balance(app: &ShentuApp, seed: u8) -> u128 {
    app.bank().balance(&addr(seed), MICRO_CTK_DENOM).unwrap()
}

fn text_proposal(proposer: u8, deposit: u128) -> Value {
    msg(
        "gov/MsgSubmitProposal",
        MsgSubmitProposal {
            content: ProposalContent::Text {
                title: "signal".to_string(),
                description: "a text proposal".to_string(),
            },
            initial_deposit: uctk(deposit),
            proposer: addr(proposer),
        },
    )
}

fn vote(proposal_id: u64, voter: u8, option: VoteOption) -> Value {
    msg(
        "gov/MsgVote",
        MsgVote {
            proposal_id,
            voter: addr(voter),
            option,
        },
    )
}

/// Run one block at `height` and time `secs` delivering `txs`.
fn block(
    app: &mut ShentuApp,
    height: u64,
    secs: u64,
    txs: &[Vec<u8>],
) -> (Vec<TxResponse>, Vec<Event>) {
    app.begin_block(height, Timestamp::new(secs)).expect("block begins");
    let responses = txs.iter().map(|t| app.deliver_tx(t)).collect();
    let events = app.end_block().expect("block ends");
    (responses, events)
}

fn find<'a>(events: &'a [Event], kind: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.kind == kind)
}

// ---------------------------------------------------------------------------
// 1. Genesis
// ---------------------------------------------------------------------------

#[test]
fn genesis_for_another_chain_is_refused() {
    let mut app = ShentuApp::new(NodeConfig {
        chain_id: "other-chain".to_string(),
        ..NodeConfig::default()
    });
    let err = app.init_chain(&genesis()).unwrap_err();
    assert!(matches!(err, NodeError::Genesis(_)));
}

#[test]
fn genesis_with_unbacked_deposits_is_refused_and_leaves_no_state() {
    let mut g = genesis();
    g.app_state.gov.deposits.push(shentu_governance::Deposit {
        proposal_id: 1,
        depositor: addr(1),
        amount: uctk(50),
    });
    let mut app = ShentuApp::new(config());
    assert!(app.init_chain(&g).is_err());
    assert_eq!(balance(&app, 1), 0);
    assert!(app.cert().certifiers().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// 2. Proposal lifecycle through transactions
// ---------------------------------------------------------------------------

#[test]
fn text_proposal_passes_and_refunds_deposit() {
    let mut app = app();

    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![text_proposal(1, 100)])]);
    assert!(res[0].is_ok(), "{}", res[0].log);
    assert_eq!(res[0].data, 1u64.to_be_bytes().to_vec());
    let submitted = find(&res[0].events, "submit_proposal").expect("submit event");
    assert_eq!(submitted.attribute("voting_period_start"), Some("1"));
    assert_eq!(balance(&app, 1), 900);

    let votes = [
        tx(1, vec![vote(1, 1, VoteOption::Yes)]),
        tx(2, vec![vote(1, 2, VoteOption::Yes)]),
        tx(3, vec![vote(1, 3, VoteOption::No)]),
    ];
    let (res, _) = block(&mut app, 2, GENESIS_TIME + 10, &votes);
    assert!(res.iter().all(TxResponse::is_ok), "{res:?}");
    assert_eq!(app.gov().votes(1).unwrap().len(), 3);

    let (_, events) = block(&mut app, 3, GENESIS_TIME + DAY, &[]);
    let result = find(&events, "active_proposal").expect("tally event");
    assert_eq!(result.attribute("proposal_id"), Some("1"));
    assert_eq!(result.attribute("proposal_result"), Some("proposal_passed"));

    let proposal = app.gov().proposal(1).unwrap().unwrap();
    assert_eq!(proposal.status, ProposalStatus::Passed);
    assert_eq!(proposal.final_tally.yes, 1_900);
    assert_eq!(proposal.final_tally.no, 1_000);
    assert!(app.gov().votes(1).unwrap().is_empty());
    assert_eq!(balance(&app, 1), 1_000);
}

#[test]
fn deposit_tx_opens_voting_period() {
    let mut app = app();
    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![text_proposal(1, 40)])]);
    assert!(res[0].is_ok(), "{}", res[0].log);
    assert_eq!(
        app.gov().proposal(1).unwrap().unwrap().status,
        ProposalStatus::DepositPeriod
    );

    let deposit = msg(
        "gov/MsgDeposit",
        MsgDeposit {
            proposal_id: 1,
            depositor: addr(2),
            amount: uctk(60),
        },
    );
    let (res, _) = block(&mut app, 2, GENESIS_TIME + 5, &[tx(2, vec![deposit])]);
    assert!(res[0].is_ok(), "{}", res[0].log);
    let event = find(&res[0].events, "proposal_deposit").expect("deposit event");
    assert_eq!(event.attribute("voting_period_start"), Some("1"));

    let proposal = app.gov().proposal(1).unwrap().unwrap();
    assert_eq!(proposal.status, ProposalStatus::VotingPeriod);
    assert_eq!(proposal.total_deposit, uctk(100));
}

#[test]
fn underfunded_proposal_is_dropped_and_deposit_burned() {
    let mut app = app();
    block(&mut app, 1, GENESIS_TIME, &[tx(2, vec![text_proposal(2, 30)])]);
    let supply_before = app.bank().supply_of(MICRO_CTK_DENOM).unwrap();

    let (_, events) = block(&mut app, 2, GENESIS_TIME + DAY, &[]);
    let dropped = find(&events, "inactive_proposal").expect("drop event");
    assert_eq!(dropped.attribute("proposal_result"), Some("proposal_dropped"));

    assert!(app.gov().proposal(1).unwrap().is_none());
    assert_eq!(balance(&app, 2), 970);
    assert_eq!(app.bank().supply_of(MICRO_CTK_DENOM).unwrap(), supply_before - 30);
}

#[test]
fn council_certifier_proposal_skips_deposits_and_adds_certifier() {
    let mut app = app();
    let submit = msg(
        "gov/MsgSubmitProposal",
        MsgSubmitProposal {
            content: ProposalContent::CertifierUpdate(CertifierUpdateProposal {
                title: "add certifier".to_string(),
                description: "grow the council".to_string(),
                certifier: addr(5),
                alias: "newcomer".to_string(),
                proposer: addr(CERTIFIER),
                add_or_remove: AddOrRemove::Add,
            }),
            initial_deposit: Coins::empty(),
            proposer: addr(CERTIFIER),
        },
    );
    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[tx(CERTIFIER, vec![submit])]);
    assert!(res[0].is_ok(), "{}", res[0].log);
    assert_eq!(
        app.gov().proposal(1).unwrap().unwrap().status,
        ProposalStatus::VotingPeriod
    );

    block(
        &mut app,
        2,
        GENESIS_TIME + 1,
        &[
            tx(CERTIFIER, vec![vote(1, CERTIFIER, VoteOption::Yes)]),
            tx(1, vec![vote(1, 1, VoteOption::Yes)]),
        ],
    );
    block(&mut app, 3, GENESIS_TIME + DAY, &[]);

    assert_eq!(
        app.gov().proposal(1).unwrap().unwrap().status,
        ProposalStatus::Passed
    );
    assert!(app.cert().is_certifier(&addr(5)).unwrap());
}

#[test]
fn council_proposer_keeps_the_offered_deposit() {
    let mut app = app();
    let submit = msg(
        "gov/MsgSubmitProposal",
        MsgSubmitProposal {
            content: ProposalContent::Text {
                title: "council signal".to_string(),
                description: "straight to a vote".to_string(),
            },
            initial_deposit: uctk(50),
            proposer: addr(CERTIFIER),
        },
    );
    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[tx(CERTIFIER, vec![submit])]);
    assert!(res[0].is_ok(), "{}", res[0].log);
    assert!(find(&res[0].events, "proposal_deposit").is_none());

    let proposal = app.gov().proposal(1).unwrap().unwrap();
    assert_eq!(proposal.status, ProposalStatus::VotingPeriod);
    assert!(proposal.total_deposit.is_zero());
    assert_eq!(balance(&app, CERTIFIER), 1_000);
    let escrow = BankKeeper::module_address(shentu_governance::MODULE_NAME);
    assert_eq!(app.bank().balance(&escrow, MICRO_CTK_DENOM).unwrap(), 0);
}

#[test]
fn certifier_update_from_non_certifier_is_rejected() {
    let mut app = app();
    let submit = msg(
        "gov/MsgSubmitProposal",
        MsgSubmitProposal {
            content: ProposalContent::CertifierUpdate(CertifierUpdateProposal {
                title: "add certifier".to_string(),
                description: "self nomination".to_string(),
                certifier: addr(1),
                alias: String::new(),
                proposer: addr(1),
                add_or_remove: AddOrRemove::Add,
            }),
            initial_deposit: uctk(100),
            proposer: addr(1),
        },
    );
    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![submit])]);
    assert!(!res[0].is_ok());
    assert_eq!(res[0].codespace, "cert");
    assert!(app.gov().proposal(1).unwrap().is_none());
    assert_eq!(balance(&app, 1), 1_000);
}

// ---------------------------------------------------------------------------
// 3. Transaction atomicity and error codes
// ---------------------------------------------------------------------------

#[test]
fn failing_message_reverts_whole_tx() {
    let mut app = app();
    let send = msg(
        "bank/MsgSend",
        MsgSend {
            from_address: addr(1),
            to_address: addr(2),
            amount: uctk(500),
        },
    );
    // Vote on a proposal that does not exist.
    let bad = tx(1, vec![send.clone(), vote(42, 1, VoteOption::Yes)]);
    let good = tx(1, vec![send]);

    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[bad, good]);
    assert!(!res[0].is_ok());
    assert!(res[0].events.is_empty());
    assert!(res[0].data.is_empty());
    assert!(res[1].is_ok(), "{}", res[1].log);
    assert_eq!(balance(&app, 1), 500);
    assert_eq!(balance(&app, 2), 1_500);
}

#[test]
fn overspending_reports_insufficient_funds() {
    let mut app = app();
    let send = msg(
        "bank/MsgSend",
        MsgSend {
            from_address: addr(3),
            to_address: addr(2),
            amount: uctk(5_000),
        },
    );
    let (res, _) = block(&mut app, 1, GENESIS_TIME, &[tx(3, vec![send])]);
    assert_eq!(res[0].code, CODE_INSUFFICIENT_FUNDS);
    assert_eq!(balance(&app, 3), 1_000);
}

#[test]
fn unknown_gov_message_is_unknown_request() {
    let mut app = app();
    let (res, _) = block(
        &mut app,
        1,
        GENESIS_TIME,
        &[tx(1, vec![json!({ "type": "gov/MsgBogus", "value": {} })])],
    );
    assert_eq!(res[0].code, CODE_UNKNOWN_REQUEST);
    assert!(res[0].log.contains("unrecognized gov message type: gov/MsgBogus"));
    assert_eq!(res[0].tx_hash.len(), 64);
}

#[test]
fn messages_must_be_signed_by_the_tx_signer() {
    let mut app = app();
    block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![text_proposal(1, 100)])]);

    let forged = tx(2, vec![vote(1, 1, VoteOption::NoWithVeto)]);
    let (res, _) = block(&mut app, 2, GENESIS_TIME + 1, &[forged]);
    assert_eq!(res[0].code, CODE_UNAUTHORIZED);
    assert!(app.gov().votes(1).unwrap().is_empty());
}

#[test]
fn deposit_escrow_cannot_be_sent_away() {
    let mut app = app();
    block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![text_proposal(1, 40)])]);
    let supply = app.bank().supply_of(MICRO_CTK_DENOM).unwrap();

    let escrow = BankKeeper::module_address(shentu_governance::MODULE_NAME);
    let drain = serde_json::to_vec(&json!({
        "signer": escrow,
        "msgs": [msg(
            "bank/MsgSend",
            MsgSend {
                from_address: escrow,
                to_address: addr(2),
                amount: uctk(40),
            },
        )],
    }))
    .unwrap();
    let (res, _) = block(&mut app, 2, GENESIS_TIME + 1, &[drain]);
    assert_eq!(res[0].code, CODE_UNAUTHORIZED);
    assert_eq!(balance(&app, 2), 1_000);

    // The deposit period still ends cleanly and burns the escrow.
    let (_, events) = block(&mut app, 3, GENESIS_TIME + DAY, &[]);
    assert!(find(&events, "inactive_proposal").is_some());
    assert!(app.gov().proposal(1).unwrap().is_none());
    assert_eq!(app.bank().supply_of(MICRO_CTK_DENOM).unwrap(), supply - 40);
}

#[test]
fn tx_outside_a_block_is_refused() {
    let mut app = app();
    let res = app.deliver_tx(&tx(1, vec![text_proposal(1, 100)]));
    assert!(!res.is_ok());
    assert!(app.gov().proposal(1).unwrap().is_none());
}

// ---------------------------------------------------------------------------
// 4. Block sequencing, halting and upgrades
// ---------------------------------------------------------------------------

#[test]
fn heights_must_be_consecutive() {
    let mut app = app();
    block(&mut app, 1, GENESIS_TIME, &[]);
    let err = app.begin_block(3, Timestamp::new(GENESIS_TIME)).unwrap_err();
    assert!(matches!(err, NodeError::HeightMismatch { last: 1, got: 3 }));

    app.begin_block(2, Timestamp::new(GENESIS_TIME)).unwrap();
    assert!(matches!(
        app.begin_block(3, Timestamp::new(GENESIS_TIME)),
        Err(NodeError::BlockInProgress(2))
    ));
}

#[test]
fn failed_end_block_discards_the_whole_block() {
    let mut app = app();
    block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![text_proposal(1, 40)])]);

    // Empty the escrow behind governance's back so burning the deposit fails.
    let escrow = BankKeeper::module_address(shentu_governance::MODULE_NAME);
    app.bank().set_balance(&escrow, MICRO_CTK_DENOM, 0).unwrap();

    let send = msg(
        "bank/MsgSend",
        MsgSend {
            from_address: addr(1),
            to_address: addr(2),
            amount: uctk(10),
        },
    );
    app.begin_block(2, Timestamp::new(GENESIS_TIME + DAY)).unwrap();
    assert!(app.deliver_tx(&tx(1, vec![send])).is_ok());
    let err = app.end_block().unwrap_err();
    assert!(matches!(err, NodeError::Governance(_)));

    assert_eq!(app.last_height(), 1);
    assert_eq!(balance(&app, 2), 1_000);
    assert!(app.gov().proposal(1).unwrap().is_some());

    // With the escrow restored the same height goes through and drops the proposal.
    app.bank().set_balance(&escrow, MICRO_CTK_DENOM, 40).unwrap();
    let (_, events) = block(&mut app, 2, GENESIS_TIME + DAY, &[]);
    assert!(find(&events, "inactive_proposal").is_some());
    assert!(app.gov().proposal(1).unwrap().is_none());
    assert_eq!(app.last_height(), 2);
}

#[test]
fn node_stops_above_halt_height() {
    let mut app = ShentuApp::new(NodeConfig {
        halt_height: 2,
        ..config()
    });
    app.init_chain(&genesis()).unwrap();
    block(&mut app, 1, GENESIS_TIME, &[]);
    block(&mut app, 2, GENESIS_TIME + 1, &[]);
    let err = app.begin_block(3, Timestamp::new(GENESIS_TIME + 2)).unwrap_err();
    assert!(matches!(
        err,
        NodeError::Halted {
            height: 3,
            halt_height: 2
        }
    ));
    assert_eq!(app.last_height(), 2);
}

fn upgrade_proposal(height: u64) -> Vec<u8> {
    tx(CERTIFIER, vec![msg(
        "gov/MsgSubmitProposal",
        MsgSubmitProposal {
            content: ProposalContent::SoftwareUpgrade(SoftwareUpgradeProposal {
                title: "v2".to_string(),
                description: "switch to v2".to_string(),
                plan: Plan {
                    name: "v2".to_string(),
                    time: None,
                    height,
                    info: String::new(),
                },
            }),
            initial_deposit: Coins::empty(),
            proposer: addr(CERTIFIER),
        },
    )])
}

/// Pass the v2 upgrade proposal in blocks 1..=3, scheduling it at `height`.
fn pass_upgrade(app: &mut ShentuApp, height: u64) {
    block(app, 1, GENESIS_TIME, &[upgrade_proposal(height)]);
    block(
        app,
        2,
        GENESIS_TIME + 1,
        &[
            tx(CERTIFIER, vec![vote(1, CERTIFIER, VoteOption::Yes)]),
            tx(2, vec![vote(1, 2, VoteOption::Yes)]),
        ],
    );
    block(app, 3, GENESIS_TIME + DAY, &[]);
    let plan = app.upgrade().upgrade_plan().unwrap().expect("plan scheduled");
    assert_eq!(plan.name, "v2");
}

#[test]
fn passed_upgrade_without_handler_stops_the_chain() {
    let mut app = app();
    pass_upgrade(&mut app, 5);
    block(&mut app, 4, GENESIS_TIME + DAY + 1, &[]);
    let err = app.begin_block(5, Timestamp::new(GENESIS_TIME + DAY + 2)).unwrap_err();
    assert!(matches!(
        err,
        NodeError::Upgrade(UpgradeError::UpgradeNeeded { height: 5, .. })
    ));
}

fn upgrading_app() -> ShentuApp {
    let mut app = ShentuApp::new(NodeConfig {
        upgrade_handlers: vec!["v2".to_string()],
        ..config()
    });
    app.init_chain(&genesis()).unwrap();
    app
}

#[test]
fn passed_upgrade_with_handler_applies_at_its_height() {
    let mut app = upgrading_app();
    pass_upgrade(&mut app, 4);

    let events = app.begin_block(4, Timestamp::new(GENESIS_TIME + DAY + 1)).unwrap();
    let applied = find(&events, "upgrade").expect("upgrade event");
    assert_eq!(applied.attribute("name"), Some("v2"));
    assert_eq!(applied.attribute("height"), Some("4"));
    app.end_block().unwrap();

    assert!(app.upgrade().upgrade_plan().unwrap().is_none());
    assert_eq!(app.upgrade().done_height("v2").unwrap(), 4);
}

#[test]
fn handler_for_a_plan_not_yet_due_is_premature() {
    let mut app = upgrading_app();
    pass_upgrade(&mut app, 6);
    let err = app.begin_block(4, Timestamp::new(GENESIS_TIME + DAY + 1)).unwrap_err();
    assert!(matches!(
        err,
        NodeError::Upgrade(UpgradeError::PrematureUpgrade(name)) if name == "v2"
    ));
}

// ---------------------------------------------------------------------------
// 5. Replay and export
// ---------------------------------------------------------------------------

#[test]
fn apply_block_reports_every_tx() {
    let mut app = app();
    let blk: Block = serde_json::from_value(json!({
        "height": 1,
        "time": GENESIS_TIME,
        "txs": [
            { "signer": addr(1), "msgs": [text_proposal(1, 100)] },
            { "msgs": [] }
        ]
    }))
    .unwrap();
    let result = app.apply_block(&blk).unwrap();
    assert_eq!(result.height, 1);
    assert_eq!(result.tx_responses.len(), 2);
    assert!(result.tx_responses[0].is_ok());
    assert!(!result.tx_responses[1].is_ok());
    assert_eq!(app.last_height(), 1);
}

#[test]
fn exported_state_reimports_identically() {
    let mut g = genesis();
    g.app_state.cvm.contracts.push(Contract {
        address: addr(7),
        code: vec![0x60, 0x80, 0x60, 0x40],
        abi: Some("[]".to_string()),
        storage: vec![StorageEntry {
            key: Word256::left_padded(&[1]),
            value: vec![0xaa],
        }],
        meta: Vec::new(),
    });
    let mut app = ShentuApp::new(config());
    app.init_chain(&g).unwrap();

    block(&mut app, 1, GENESIS_TIME, &[tx(1, vec![text_proposal(1, 100)])]);
    block(&mut app, 2, GENESIS_TIME + 1, &[tx(2, vec![vote(1, 2, VoteOption::Abstain)])]);

    let exported = app.export_genesis().unwrap();
    assert_eq!(exported.app_state.gov.proposals.len(), 1);
    assert_eq!(exported.app_state.gov.deposits.len(), 1);
    assert_eq!(exported.app_state.cvm.contracts.len(), 1);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("export.json");
    exported.write_json_file(&path).unwrap();

    let mut restored = ShentuApp::new(config());
    restored
        .init_chain(&AppGenesis::from_json_file(&path).unwrap())
        .unwrap();
    assert_eq!(restored.export_genesis().unwrap(), exported);

    // The restored chain still tallies the proposal it inherited.
    let (_, events) = block(&mut restored, 1, GENESIS_TIME + DAY, &[]);
    assert_eq!(
        find(&events, "active_proposal").and_then(|e| e.attribute("proposal_result")),
        Some("proposal_rejected")
    );
}
