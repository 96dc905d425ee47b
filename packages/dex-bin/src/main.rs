mod denom;
mod msg;
mod packet;
mod query;

use anyhow::Result;
use clap::Parser;
use dex::clap::QueryOpt;
use tracing_subscriber::EnvFilter;

/// Command line tool for the interchange dex module
#[derive(clap::Parser)]
struct Cmd {
    #[clap(flatten)]
    opt: Opt,
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[derive(clap::Parser)]
struct Opt {
    #[clap(flatten)]
    query_opt: QueryOpt,
    /// Turn on verbose output
    #[clap(long, short, global = true)]
    verbose: bool,
}

impl Opt {
    fn init_logger(&self) {
        let default = if self.verbose {
            "dex=debug,info"
        } else {
            "info"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cmd::parse();
    cmd.opt.init_logger();

    cmd.subcommand.go(cmd.opt).await
}

#[derive(clap::Parser)]
enum Subcommand {
    /// Encode and decode IBC packet payloads
    Packet {
        #[clap(flatten)]
        opt: packet::Opt,
    },
    /// Build and inspect transaction messages
    Msg {
        #[clap(flatten)]
        opt: msg::Opt,
    },
    /// Query the module over REST
    Query {
        #[clap(flatten)]
        opt: query::Opt,
    },
    /// Denomination helpers
    Denom {
        #[clap(flatten)]
        opt: denom::Opt,
    },
}

impl Subcommand {
    pub(crate) async fn go(self, opt: Opt) -> Result<()> {
        match self {
            Subcommand::Packet { opt } => packet::go(opt),
            Subcommand::Msg { opt } => msg::go(opt),
            Subcommand::Query { opt: query_opt } => {
                let client = opt.query_opt.build()?;
                query::go(query_opt, client).await
            }
            Subcommand::Denom { opt } => {
                denom::go(opt);
                Ok(())
            }
        }
    }
}
