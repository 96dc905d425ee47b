use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use dex::{Page, PageRequest, QueryClient};
use serde::Serialize;

#[derive(clap::Parser)]
pub(crate) struct Opt {
    #[clap(subcommand)]
    sub: Subcommand,
}

#[derive(clap::Parser)]
pub(crate) struct PageOpt {
    /// Key returned by the previous page (base64)
    #[clap(long)]
    key: Option<String>,
    #[clap(long)]
    offset: Option<u64>,
    /// Maximum number of entries to return
    #[clap(long)]
    limit: Option<u64>,
    /// Ask the node to count all entries
    #[clap(long)]
    count_total: bool,
    #[clap(long)]
    reverse: bool,
}

impl PageOpt {
    fn into_request(self) -> Result<PageRequest> {
        let PageOpt {
            key,
            offset,
            limit,
            count_total,
            reverse,
        } = self;
        let key = key
            .map(|key| {
                STANDARD
                    .decode(&key)
                    .with_context(|| format!("Invalid pagination key {key:?}"))
            })
            .transpose()?;
        Ok(PageRequest {
            key,
            offset,
            limit,
            count_total,
            reverse,
        })
    }
}

#[derive(clap::Parser)]
pub(crate) enum Subcommand {
    /// Show the module parameters
    Params {},
    /// Show one sell order book, or list them all when no index is given
    SellOrderBook {
        /// Order book index, e.g. dex-channel-0-marscoin-venuscoin
        index: Option<String>,
        #[clap(flatten)]
        page: PageOpt,
    },
    /// Show one buy order book, or list them all when no index is given
    BuyOrderBook {
        /// Order book index, e.g. dex-channel-0-marscoin-venuscoin
        index: Option<String>,
        #[clap(flatten)]
        page: PageOpt,
    },
    /// Show one denom trace, or list them all when no voucher denom is given
    DenomTrace {
        /// Voucher denom
        index: Option<String>,
        #[clap(flatten)]
        page: PageOpt,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page<T: Serialize>(Page { items, pagination }: Page<T>) -> Result<()> {
    print_json(&items)?;
    if let Some(pagination) = pagination {
        if pagination.total > 0 {
            println!("Total: {}", pagination.total);
        }
        if let Some(next_key) = pagination.next_key {
            println!("Next page: --key {}", STANDARD.encode(next_key));
        }
    }
    Ok(())
}

pub(crate) async fn go(Opt { sub }: Opt, client: QueryClient) -> Result<()> {
    match sub {
        Subcommand::Params {} => print_json(&client.params().await?),
        Subcommand::SellOrderBook { index, page } => match index {
            Some(index) => print_json(&client.sell_order_book(&index).await?),
            None => print_page(
                client
                    .all_sell_order_books(&page.into_request()?)
                    .await?,
            ),
        },
        Subcommand::BuyOrderBook { index, page } => match index {
            Some(index) => print_json(&client.buy_order_book(&index).await?),
            None => print_page(client.all_buy_order_books(&page.into_request()?).await?),
        },
        Subcommand::DenomTrace { index, page } => match index {
            Some(index) => print_json(&client.denom_trace(&index).await?),
            None => print_page(client.all_denom_traces(&page.into_request()?).await?),
        },
    }
}
