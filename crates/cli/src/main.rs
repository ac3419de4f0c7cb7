pub(crate) mod error;
pub(crate) mod log_args;

use error::Error;
use log_args::LogArgs;
use tracing::error;

use clap::{Parser, Subcommand};

use jeth_config::{config, ConfigArgs, Configuration};
use jeth_core::{
    balance, block_number, call, chain_id, event, gas_price, gas_tip, pack, params, receipt,
    selector, tx_count, unpack, AccountArgs, CallArgs, ChainArgs, CommandOutput, EventArgs,
    FeeArgs, PackArgs, ParamsArgs, ReceiptArgs, SelectorArgs, UnpackArgs,
};

#[derive(Debug, Parser)]
#[clap(name = "jeth", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub(crate) sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(about = "Pack, unpack and call Ethereum contract methods from the command line")]
pub(crate) enum Subcommands {
    #[clap(name = "pack", about = "Pack method arguments into ABI encoded call data")]
    Pack(PackArgs),

    #[clap(name = "unpack", about = "Unpack ABI encoded data into typed values")]
    Unpack(UnpackArgs),

    #[clap(name = "event", about = "Decode an event log from its topics and data")]
    Event(EventArgs),

    #[clap(name = "selector", about = "Hash a method or event signature")]
    Selector(SelectorArgs),

    #[clap(name = "call", about = "Call a contract method with eth_call")]
    Call(CallArgs),

    #[clap(
        name = "params",
        visible_alias = "tx-params",
        about = "Fetch the parameters needed to send a transaction"
    )]
    Params(ParamsArgs),

    #[clap(name = "chain-id", about = "Print the chain id of the node")]
    ChainId(ChainArgs),

    #[clap(name = "block-number", about = "Print the latest block number")]
    BlockNumber(ChainArgs),

    #[clap(name = "gas-price", about = "Print the current gas price")]
    GasPrice(FeeArgs),

    #[clap(
        name = "tip",
        visible_alias = "max-priority-fee",
        about = "Print the suggested priority fee per gas"
    )]
    Tip(FeeArgs),

    #[clap(name = "balance", about = "Print the balance of an account, in wei")]
    Balance(AccountArgs),

    #[clap(name = "tx-count", about = "Print the number of transactions sent from an account")]
    TxCount(AccountArgs),

    #[clap(
        name = "receipt",
        visible_alias = "tx-receipt",
        about = "Fetch a transaction receipt and decode its logs"
    )]
    Receipt(ReceiptArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let args = Arguments::parse();

    // setup logging, keeping the file writer alive until exit
    let _guard = args.logs.init_tracing().unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {e}");
        None
    });

    if let Err(e) = run(args.sub).await {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(sub: Subcommands) -> Result<(), Error> {
    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;

    let output = match sub {
        Subcommands::Pack(cmd) => {
            let plain = cmd.plain;
            pack(cmd)?.render(plain)?
        }

        Subcommands::Unpack(cmd) => {
            let plain = cmd.plain;
            unpack(cmd)?.render(plain)?
        }

        Subcommands::Event(cmd) => {
            let plain = cmd.plain;
            event(cmd)?.render(plain)?
        }

        Subcommands::Selector(cmd) => {
            let plain = cmd.plain;
            selector(cmd)?.render(plain)?
        }

        Subcommands::Call(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            call(cmd).await?.render(plain)?
        }

        Subcommands::Params(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);

            if cmd.timeout == 0 {
                cmd.timeout = configuration.rpc_timeout_secs;
            }

            let plain = cmd.plain;
            params(cmd).await?.render(plain)?
        }

        Subcommands::ChainId(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            chain_id(cmd).await?.render(plain)?
        }

        Subcommands::BlockNumber(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            block_number(cmd).await?.render(plain)?
        }

        Subcommands::GasPrice(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            gas_price(cmd).await?.render(plain)?
        }

        Subcommands::Tip(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            gas_tip(cmd).await?.render(plain)?
        }

        Subcommands::Balance(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            balance(cmd).await?.render(plain)?
        }

        Subcommands::TxCount(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            tx_count(cmd).await?.render(plain)?
        }

        Subcommands::Receipt(mut cmd) => {
            default_rpc_url(&mut cmd.rpc_url, &configuration);
            let plain = cmd.plain;
            receipt(cmd).await?.render(plain)?
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {}", e)))?;
            return Ok(());
        }
    };

    println!("{output}");
    Ok(())
}

/// If the user has not specified a rpc url, use the configured one.
fn default_rpc_url(rpc_url: &mut String, configuration: &Configuration) {
    if rpc_url.is_empty() {
        rpc_url.clone_from(&configuration.rpc_url);
    }
}
