//! The Shentu application: keepers wired over one store, driven block by block.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shentu_bank::BankKeeper;
use shentu_cert::CertKeeper;
use shentu_cvm::CvmKeeper;
use shentu_governance::GovKeeper;
use shentu_store::{Checkpoint, KvStore, MemoryStore};
use shentu_types::{Context, Event, Timestamp, TxHash};
use shentu_upgrade::{Plan, UpgradeHandler, UpgradeKeeper};

use crate::config::NodeConfig;
use crate::genesis::{AppGenesis, AppState};
use crate::tracing_spans::{block_span, msg_span, tx_span};
use crate::tx::{decode_tx, Msg, TxResponse, CODE_OK};
use crate::NodeError;

/// One block to apply: header fields plus its transactions as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    pub time: Timestamp,
    #[serde(default)]
    pub txs: Vec<serde_json::Value>,
}

/// Everything a block produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResult {
    pub height: u64,
    pub begin_events: Vec<Event>,
    pub tx_responses: Vec<TxResponse>,
    pub end_events: Vec<Event>,
}

pub struct ShentuApp {
    config: NodeConfig,
    store: Arc<MemoryStore>,
    bank: BankKeeper,
    cert: CertKeeper,
    upgrade: UpgradeKeeper,
    gov: GovKeeper,
    cvm: CvmKeeper,
    genesis_time: Timestamp,
    last_height: u64,
    block: Option<OpenBlock>,
}

/// A block between `begin_block` and `end_block`, with the state it started from.
struct OpenBlock {
    ctx: Context,
    checkpoint: Checkpoint,
}

impl ShentuApp {
    /// Build the application with a no-op migration for every upgrade
    /// named in `config.upgrade_handlers`.
    pub fn new(config: NodeConfig) -> Self {
        let handlers = config
            .upgrade_handlers
            .iter()
            .map(|name| {
                let handler: UpgradeHandler = Arc::new(|ctx: &Context, plan: &Plan| {
                    tracing::info!(name = %plan.name, height = ctx.height, "applying upgrade");
                    Ok::<(), String>(())
                });
                (name.clone(), handler)
            })
            .collect::<Vec<_>>();
        Self::with_upgrade_handlers(config, handlers)
    }

    pub fn with_upgrade_handlers(
        config: NodeConfig,
        handlers: impl IntoIterator<Item = (String, UpgradeHandler)>,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());
        let backend: Arc<dyn KvStore> = store.clone();

        let bank = BankKeeper::new(backend.clone())
            .with_module_accounts([shentu_governance::MODULE_NAME]);
        let cert = CertKeeper::new(backend.clone());
        // Handlers go in before the keeper is cloned into governance.
        let mut upgrade = UpgradeKeeper::new(backend.clone());
        for (name, handler) in handlers {
            upgrade.set_upgrade_handler(name, handler);
        }
        let gov = GovKeeper::new(
            backend.clone(),
            bank.clone(),
            cert.clone(),
            upgrade.clone(),
            Arc::new(bank.clone()),
        );
        let cvm = CvmKeeper::new(backend, bank.clone());

        Self {
            config,
            store,
            bank,
            cert,
            upgrade,
            gov,
            cvm,
            genesis_time: Timestamp::EPOCH,
            last_height: 0,
            block: None,
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn chain_id(&self) -> &str {
        &self.config.chain_id
    }

    pub fn halt_height(&self) -> u64 {
        self.config.halt_height
    }

    pub fn last_height(&self) -> u64 {
        self.last_height
    }

    pub fn bank(&self) -> &BankKeeper {
        &self.bank
    }

    pub fn cert(&self) -> &CertKeeper {
        &self.cert
    }

    pub fn upgrade(&self) -> &UpgradeKeeper {
        &self.upgrade
    }

    pub fn gov(&self) -> &GovKeeper {
        &self.gov
    }

    pub fn cvm(&self) -> &CvmKeeper {
        &self.cvm
    }

    /// Import genesis state. Bank runs first so governance escrow checks and
    /// CVM contract accounts see the genesis balances.
    pub fn init_chain(&mut self, genesis: &AppGenesis) -> Result<(), NodeError> {
        if genesis.chain_id != self.config.chain_id {
            return Err(NodeError::Genesis(format!(
                "genesis is for chain {:?}, node is configured for {:?}",
                genesis.chain_id, self.config.chain_id
            )));
        }
        genesis.validate()?;

        let checkpoint = self.store.checkpoint()?;
        if let Err(err) = self.import_state(&genesis.app_state) {
            self.store.revert(checkpoint)?;
            return Err(err);
        }

        self.genesis_time = genesis.genesis_time;
        self.last_height = 0;
        tracing::info!(
            chain_id = %genesis.chain_id,
            genesis_time = %genesis.genesis_time,
            "chain initialised"
        );
        Ok(())
    }

    fn import_state(&self, state: &AppState) -> Result<(), NodeError> {
        shentu_bank::genesis::init_genesis(&self.bank, &state.bank)?;
        shentu_cert::genesis::init_genesis(&self.cert, &state.cert)?;
        shentu_governance::genesis::init_genesis(&self.gov, &state.gov)?;
        shentu_cvm::genesis::init_genesis(&self.cvm, &state.cvm)?;
        Ok(())
    }

    /// Open block `height`, running any upgrade that comes due.
    ///
    /// The block is atomic: if it fails to begin or to end, the store goes
    /// back to its state before this call and the same height can be retried.
    pub fn begin_block(&mut self, height: u64, time: Timestamp) -> Result<Vec<Event>, NodeError> {
        if let Some(open) = &self.block {
            return Err(NodeError::BlockInProgress(open.ctx.height));
        }
        let halt_height = self.config.halt_height;
        if halt_height > 0 && height > halt_height {
            tracing::warn!(height, halt_height, "halt height reached");
            return Err(NodeError::Halted {
                height,
                halt_height,
            });
        }
        if height != self.last_height + 1 {
            return Err(NodeError::HeightMismatch {
                last: self.last_height,
                got: height,
            });
        }

        let checkpoint = self.store.checkpoint()?;
        let mut ctx = Context::new(self.config.chain_id.clone(), height, time);
        if let Err(err) = self.upgrade.begin_block(&mut ctx) {
            self.store.revert(checkpoint)?;
            return Err(err.into());
        }
        let events = ctx.events.drain();
        self.block = Some(OpenBlock { ctx, checkpoint });
        Ok(events)
    }

    /// Deliver one transaction in the open block.
    ///
    /// All messages apply or none do: any failure reverts the store to its
    /// state before the transaction.
    pub fn deliver_tx(&mut self, tx_bytes: &[u8]) -> TxResponse {
        let tx_hash = TxHash::of(tx_bytes).to_string();
        let _span = tx_span(&tx_hash).entered();

        let Some(block) = self.block.as_ref() else {
            return TxResponse::failed(&NodeError::NoBlock, tx_hash);
        };
        let block = &block.ctx;
        let checkpoint = match self.store.checkpoint() {
            Ok(checkpoint) => checkpoint,
            Err(err) => return TxResponse::failed(&NodeError::from(err), tx_hash),
        };

        match self.run_tx(block, tx_bytes) {
            Ok((data, events)) => {
                tracing::debug!(events = events.len(), "tx delivered");
                TxResponse {
                    code: CODE_OK,
                    codespace: String::new(),
                    log: String::new(),
                    data,
                    events,
                    tx_hash,
                }
            }
            Err(err) => {
                if let Err(revert_err) = self.store.revert(checkpoint) {
                    tracing::error!(error = %revert_err, "failed to revert tx state");
                }
                tracing::info!(error = %err, "tx failed");
                TxResponse::failed(&err, tx_hash)
            }
        }
    }

    fn run_tx(&self, block: &Context, tx_bytes: &[u8]) -> Result<(Vec<u8>, Vec<Event>), NodeError> {
        let msgs = decode_tx(tx_bytes)?;
        for msg in &msgs {
            msg.validate_basic()?;
        }

        let mut ctx = block.with_tx_bytes(tx_bytes.to_vec());
        let mut data = Vec::new();
        for (index, msg) in msgs.iter().enumerate() {
            let _span = msg_span(index, &msg.type_url()).entered();
            let result = match msg {
                Msg::Bank(m) => shentu_bank::handle_msg_send(&mut ctx, &self.bank, m)?,
                Msg::Gov(m) => shentu_governance::handle(&mut ctx, &self.gov, m)?,
            };
            data.extend(result.data);
        }
        Ok((data, ctx.events.drain()))
    }

    /// Close the open block: run the governance end-blocker.
    ///
    /// On failure the whole block, transactions included, is rolled back.
    pub fn end_block(&mut self) -> Result<Vec<Event>, NodeError> {
        let OpenBlock { mut ctx, checkpoint } = self.block.take().ok_or(NodeError::NoBlock)?;
        if let Err(err) = shentu_governance::end_blocker(&mut ctx, &self.gov) {
            tracing::error!(height = ctx.height, error = %err, "end block failed, discarding block");
            self.store.revert(checkpoint)?;
            return Err(err.into());
        }
        self.last_height = ctx.height;
        Ok(ctx.events.drain())
    }

    /// Begin, deliver every transaction, and end one block.
    pub fn apply_block(&mut self, block: &Block) -> Result<BlockResult, NodeError> {
        let _span = block_span(&self.config.chain_id, block.height).entered();
        let begin_events = self.begin_block(block.height, block.time)?;
        let mut tx_responses = Vec::with_capacity(block.txs.len());
        for tx in &block.txs {
            let bytes = serde_json::to_vec(tx)?;
            tx_responses.push(self.deliver_tx(&bytes));
        }
        let end_events = self.end_block()?;
        let failed = tx_responses.iter().filter(|r| !r.is_ok()).count();
        tracing::info!(
            height = block.height,
            txs = tx_responses.len(),
            failed,
            "block applied"
        );
        Ok(BlockResult {
            height: block.height,
            begin_events,
            tx_responses,
            end_events,
        })
    }

    /// Current state as a genesis document.
    pub fn export_genesis(&self) -> Result<AppGenesis, NodeError> {
        Ok(AppGenesis {
            chain_id: self.config.chain_id.clone(),
            genesis_time: self.genesis_time,
            app_state: AppState {
                bank: shentu_bank::genesis::export_genesis(&self.bank)?,
                cert: shentu_cert::genesis::export_genesis(&self.cert)?,
                gov: shentu_governance::genesis::export_genesis(&self.gov)?,
                cvm: shentu_cvm::genesis::export_genesis(&self.cvm)?,
            },
        })
    }
}
