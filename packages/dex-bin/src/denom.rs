#[derive(clap::Parser)]
pub(crate) struct Opt {
    #[clap(subcommand)]
    sub: Subcommand,
}

#[derive(clap::Parser)]
pub(crate) enum Subcommand {
    /// Voucher denom the module mints for a token received over a channel
    Voucher {
        /// Destination port
        #[clap(long, default_value = "dex")]
        port: String,
        /// Destination channel, e.g. channel-0
        #[clap(long)]
        channel: String,
        /// Denom on the source chain
        denom: String,
    },
    /// Key of the order book for a pair
    OrderBookIndex {
        #[clap(long, default_value = "dex")]
        port: String,
        #[clap(long)]
        channel: String,
        amount_denom: String,
        price_denom: String,
    },
}

pub(crate) fn go(Opt { sub }: Opt) {
    match sub {
        Subcommand::Voucher {
            port,
            channel,
            denom,
        } => {
            if dex::is_ibc_token(&denom) {
                tracing::warn!("{denom} is already an IBC voucher");
            }
            println!("{}", dex::voucher_denom(&port, &channel, &denom));
        }
        Subcommand::OrderBookIndex {
            port,
            channel,
            amount_denom,
            price_denom,
        } => println!(
            "{}",
            dex::order_book_index(&port, &channel, &amount_denom, &price_denom)
        ),
    }
}
