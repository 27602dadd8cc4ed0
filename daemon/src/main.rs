//! shentud: command-line entry point for the Shentu application.

use anyhow::{bail, Context as _};
use clap::Parser;
use std::path::{Path, PathBuf};

use shentu_node::{init_logging, AppGenesis, Block, NodeConfig, NodeError, ShentuApp};
use shentu_types::Timestamp;

#[derive(Parser)]
#[command(name = "shentud", about = "Shentu chain application daemon")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "SHENTU_CONFIG")]
    config: Option<PathBuf>,

    /// Chain id to serve.
    #[arg(long, env = "SHENTU_CHAIN_ID")]
    chain_id: Option<String>,

    /// Stop before any block above this height (0 = never).
    #[arg(long, env = "SHENTU_HALT_HEIGHT")]
    halt_height: Option<u64>,

    /// Log level filter, e.g. "info" or "debug,shentu_governance=trace".
    #[arg(long, env = "SHENTU_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "SHENTU_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Write an empty genesis file for the configured chain.
    DefaultGenesis {
        /// Where to write the genesis file.
        #[arg(long, default_value = "genesis.json")]
        out: PathBuf,

        /// Genesis time in Unix seconds (defaults to now).
        #[arg(long)]
        genesis_time: Option<u64>,
    },

    /// Check a genesis file and import it into a fresh application.
    ValidateGenesis {
        /// Genesis file to check (defaults to the configured genesis path).
        file: Option<PathBuf>,
    },

    /// Import a genesis file, then apply a JSON array of blocks in order.
    Replay {
        /// Genesis file (defaults to the configured genesis path).
        #[arg(long)]
        genesis: Option<PathBuf>,

        /// JSON file holding an array of blocks.
        #[arg(long)]
        blocks: PathBuf,

        /// Write the final state as a genesis file.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    ShowConfig,
}

fn load_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let file_config = match &cli.config {
        Some(path) => {
            let path_str = path.to_str().context("config path is not valid UTF-8")?;
            NodeConfig::from_toml_file(path_str)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => NodeConfig::default(),
    };

    Ok(NodeConfig {
        chain_id: cli.chain_id.clone().unwrap_or(file_config.chain_id.clone()),
        halt_height: cli.halt_height.unwrap_or(file_config.halt_height),
        log_level: cli.log_level.clone().unwrap_or(file_config.log_level.clone()),
        log_format: cli.log_format.clone().unwrap_or(file_config.log_format.clone()),
        ..file_config
    })
}

fn genesis_path(arg: Option<PathBuf>, config: &NodeConfig) -> anyhow::Result<PathBuf> {
    match arg.or_else(|| config.genesis_path.clone()) {
        Some(path) => Ok(path),
        None => bail!("no genesis file given and none configured"),
    }
}

fn load_app(config: &NodeConfig, path: &Path) -> anyhow::Result<ShentuApp> {
    let genesis = AppGenesis::from_json_file(path)
        .with_context(|| format!("reading genesis from {}", path.display()))?;
    let mut app = ShentuApp::new(config.clone());
    app.init_chain(&genesis)
        .with_context(|| format!("importing genesis from {}", path.display()))?;
    Ok(app)
}

fn replay(app: &mut ShentuApp, blocks: &[Block]) -> anyhow::Result<()> {
    for block in blocks {
        let result = match app.apply_block(block) {
            Ok(result) => result,
            Err(NodeError::Halted {
                height,
                halt_height,
            }) => {
                tracing::warn!(height, halt_height, "halt height reached, stopping replay");
                return Ok(());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("applying block {}", block.height))
            }
        };
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format()?, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::DefaultGenesis { out, genesis_time } => {
            let time = genesis_time.map(Timestamp::new).unwrap_or_else(Timestamp::now);
            let genesis = AppGenesis::new(config.chain_id.clone(), time);
            genesis.write_json_file(&out)?;
            tracing::info!(chain_id = %config.chain_id, "wrote genesis to {}", out.display());
        }
        Command::ValidateGenesis { file } => {
            let path = genesis_path(file, &config)?;
            load_app(&config, &path)?;
            println!("{} is a valid genesis file", path.display());
        }
        Command::Replay {
            genesis,
            blocks,
            export,
        } => {
            let path = genesis_path(genesis, &config)?;
            let mut app = load_app(&config, &path)?;
            let content = std::fs::read_to_string(&blocks)
                .with_context(|| format!("reading blocks from {}", blocks.display()))?;
            let blocks: Vec<Block> = serde_json::from_str(&content)?;
            replay(&mut app, &blocks)?;
            tracing::info!(height = app.last_height(), "replay finished");

            if let Some(out) = export {
                app.export_genesis()?.write_json_file(&out)?;
                tracing::info!("exported state to {}", out.display());
            }
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
