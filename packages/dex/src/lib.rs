//! Client library for the interchange dex module.
//!
//! Provides the protobuf codec for the IBC packets and acknowledgements the
//! module exchanges, its transaction messages with a signing facade, and a
//! REST query client.

pub use ack::{
    encode_base64, Acknowledgement, BuyOrderPacketAck, CreatePairPacketAck,
    PartialBuyOrderPacketAck, PartialSellOrderPacketAck, SellOrderPacketAck,
};
pub use address::{Address, HasAddress, RawAddress};
pub use client::{AccountData, OfflineSigner, SigningBackend, TxClient};
pub use cosmos_sdk_proto as proto;
pub use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
pub use denom::{is_ibc_token, order_book_index, voucher_denom, IBC_PREFIX};
pub use ext::{SentPacket, TxResponseExt};
pub use messages::{
    DexMessage, DexMsg, MsgCancelBuyOrder, MsgCancelSellOrder, MsgSendBuyOrder, MsgSendCreatePair,
    MsgSendSellOrder, MSG_CANCEL_BUY_ORDER, MSG_CANCEL_SELL_ORDER, MSG_SEND_BUY_ORDER,
    MSG_SEND_CREATE_PAIR, MSG_SEND_SELL_ORDER, REGISTERED_TYPE_URLS,
};
pub use packet::{
    dex_packet_data, BuyOrderPacketData, CreatePairPacketData, DexPacket, DexPacketData,
    FromPartial, NoData, PacketCodec, PartialBuyOrderPacketData, PartialCreatePairPacketData,
    PartialDexPacketData, PartialSellOrderPacketData, SellOrderPacketData,
};
pub use query::{
    BuyOrderBook, DenomTrace, Order, OrderBook, Page, PageRequest, PageResponse, Params,
    QueryClient, SellOrderBook,
};
pub use query_builder::{QueryClientBuilder, DEFAULT_REST_URL, DEFAULT_ROUTE_PREFIX};
pub use txbuilder::{
    default_fee, SignAndBroadcastOptions, TxBuilder, TypedMessage, DEFAULT_GAS_LIMIT,
};

mod ack;
mod address;
#[cfg(feature = "clap")]
pub mod clap;
mod client;
mod denom;
pub mod error;
mod ext;
mod messages;
mod packet;
mod query;
mod query_builder;
mod txbuilder;
