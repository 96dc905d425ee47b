use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use dex::{
    proto::Any, DexMsg, MsgCancelBuyOrder, MsgCancelSellOrder, MsgSendBuyOrder,
    MsgSendCreatePair, MsgSendSellOrder, TxBuilder,
};

#[derive(clap::Parser)]
pub(crate) struct Opt {
    /// Memo to put on transaction
    #[clap(long, global = true)]
    memo: Option<String>,
    #[clap(subcommand)]
    sub: Subcommand,
}

/// Where a message's packet is sent from
#[derive(clap::Parser)]
pub(crate) struct Route {
    /// Signer of the message
    #[clap(long, env = "DEX_CREATOR")]
    creator: String,
    /// Source port
    #[clap(long, default_value = "dex")]
    port: String,
    /// Source channel, e.g. channel-0
    #[clap(long)]
    channel: String,
}

#[derive(clap::Parser)]
pub(crate) enum Subcommand {
    /// Build a message creating a trading pair on the counterparty chain
    SendCreatePair {
        #[clap(flatten)]
        route: Route,
        /// Packet timeout, in nanoseconds since the epoch
        #[clap(long, default_value_t = 0)]
        timeout_timestamp: u64,
        source_denom: String,
        target_denom: String,
    },
    /// Build a sell order message
    SendSellOrder {
        #[clap(flatten)]
        route: Route,
        /// Packet timeout, in nanoseconds since the epoch
        #[clap(long, default_value_t = 0)]
        timeout_timestamp: u64,
        amount_denom: String,
        amount: i32,
        price_denom: String,
        price: i32,
    },
    /// Build a buy order message
    SendBuyOrder {
        #[clap(flatten)]
        route: Route,
        /// Packet timeout, in nanoseconds since the epoch
        #[clap(long, default_value_t = 0)]
        timeout_timestamp: u64,
        amount_denom: String,
        amount: i32,
        price_denom: String,
        price: i32,
    },
    /// Build a message cancelling a sell order
    CancelSellOrder {
        #[clap(flatten)]
        route: Route,
        amount_denom: String,
        price_denom: String,
        order_id: i32,
    },
    /// Build a message cancelling a buy order
    CancelBuyOrder {
        #[clap(flatten)]
        route: Route,
        amount_denom: String,
        price_denom: String,
        order_id: i32,
    },
    /// Decode a message from its type URL and base64 value
    Decode { type_url: String, value: String },
}

impl Subcommand {
    fn into_msg(self) -> Result<DexMsg> {
        Ok(match self {
            Subcommand::SendCreatePair {
                route:
                    Route {
                        creator,
                        port,
                        channel,
                    },
                timeout_timestamp,
                source_denom,
                target_denom,
            } => DexMsg::SendCreatePair(MsgSendCreatePair {
                creator,
                port,
                channel_id: channel,
                timeout_timestamp,
                source_denom,
                target_denom,
            }),
            Subcommand::SendSellOrder {
                route:
                    Route {
                        creator,
                        port,
                        channel,
                    },
                timeout_timestamp,
                amount_denom,
                amount,
                price_denom,
                price,
            } => DexMsg::SendSellOrder(MsgSendSellOrder {
                creator,
                port,
                channel_id: channel,
                timeout_timestamp,
                amount_denom,
                amount,
                price_denom,
                price,
            }),
            Subcommand::SendBuyOrder {
                route:
                    Route {
                        creator,
                        port,
                        channel,
                    },
                timeout_timestamp,
                amount_denom,
                amount,
                price_denom,
                price,
            } => DexMsg::SendBuyOrder(MsgSendBuyOrder {
                creator,
                port,
                channel_id: channel,
                timeout_timestamp,
                amount_denom,
                amount,
                price_denom,
                price,
            }),
            Subcommand::CancelSellOrder {
                route:
                    Route {
                        creator,
                        port,
                        channel,
                    },
                amount_denom,
                price_denom,
                order_id,
            } => DexMsg::CancelSellOrder(MsgCancelSellOrder {
                creator,
                port,
                channel,
                amount_denom,
                price_denom,
                order_id,
            }),
            Subcommand::CancelBuyOrder {
                route:
                    Route {
                        creator,
                        port,
                        channel,
                    },
                amount_denom,
                price_denom,
                order_id,
            } => DexMsg::CancelBuyOrder(MsgCancelBuyOrder {
                creator,
                port,
                channel,
                amount_denom,
                price_denom,
                order_id,
            }),
            Subcommand::Decode { type_url, value } => {
                let value = STANDARD
                    .decode(value.trim())
                    .with_context(|| format!("Invalid base64 value {value:?}"))?;
                DexMsg::try_from(&Any { type_url, value })?
            }
        })
    }
}

pub(crate) fn go(Opt { memo, sub }: Opt) -> Result<()> {
    if let Subcommand::Decode { .. } = sub {
        let msg = sub.into_msg()?;
        if let Err(e) = msg.validate_basic() {
            tracing::warn!("Message would be rejected by the chain: {e}");
        }
        println!("{msg:#?}");
        return Ok(());
    }

    let msg = sub.into_msg()?;
    msg.validate_basic()
        .with_context(|| format!("Invalid {} message", msg.type_url()))?;

    let mut builder = TxBuilder::default();
    builder.add_message(msg).set_optional_memo(memo);
    tracing::info!("Unsigned transaction:\n{builder}");
    for msg in builder.messages() {
        let any = msg.clone().into_inner();
        println!("{}", any.type_url);
        println!("{}", STANDARD.encode(&any.value));
    }
    Ok(())
}
