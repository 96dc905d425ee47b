//! Packet acknowledgments returned by the receiving dex module.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{
    error::CodecError,
    packet::{is_zero, null_as_default, FromPartial, PacketCodec},
};

/// Acknowledgment for a create-pair packet. Carries no data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePairPacketAck {}

/// Result of filling a sell order against the remote buy order book.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellOrderPacketAck {
    #[prost(int32, tag = "1")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub remaining_amount: i32,
    #[prost(int32, tag = "2")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub gain: i32,
}

/// Result of filling a buy order against the remote sell order book.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuyOrderPacketAck {
    #[prost(int32, tag = "1")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub remaining_amount: i32,
    #[prost(int32, tag = "2")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub purchase: i32,
}

impl PacketCodec for CreatePairPacketAck {}
impl PacketCodec for SellOrderPacketAck {}
impl PacketCodec for BuyOrderPacketAck {}

impl FromPartial for CreatePairPacketAck {
    type Partial = CreatePairPacketAck;

    fn from_partial(_: CreatePairPacketAck) -> Self {
        CreatePairPacketAck {}
    }
}

/// Partial form of [SellOrderPacketAck].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialSellOrderPacketAck {
    pub remaining_amount: Option<i32>,
    pub gain: Option<i32>,
}

impl FromPartial for SellOrderPacketAck {
    type Partial = PartialSellOrderPacketAck;

    fn from_partial(partial: PartialSellOrderPacketAck) -> Self {
        SellOrderPacketAck {
            remaining_amount: partial.remaining_amount.unwrap_or_default(),
            gain: partial.gain.unwrap_or_default(),
        }
    }
}

/// Partial form of [BuyOrderPacketAck].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialBuyOrderPacketAck {
    pub remaining_amount: Option<i32>,
    pub purchase: Option<i32>,
}

impl FromPartial for BuyOrderPacketAck {
    type Partial = PartialBuyOrderPacketAck;

    fn from_partial(partial: PartialBuyOrderPacketAck) -> Self {
        BuyOrderPacketAck {
            remaining_amount: partial.remaining_amount.unwrap_or_default(),
            purchase: partial.purchase.unwrap_or_default(),
        }
    }
}

/// The IBC channel acknowledgment wrapping a module-specific ack.
///
/// Serialized as `{"result": "<base64>"}` or `{"error": "<message>"}`. The dex
/// module places the JSON projection of its ack inside `result`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    Result(#[serde(with = "base64_bytes")] Vec<u8>),
    Error(String),
}

impl Acknowledgement {
    /// Successful acknowledgment carrying the JSON form of `ack`.
    pub fn success<T: PacketCodec>(ack: &T) -> Result<Self, CodecError> {
        Ok(Acknowledgement::Result(serde_json::to_vec(&ack.to_plain()?)?))
    }

    /// Parse the raw acknowledgment bytes written by the channel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode the module ack, or return the counterparty's error message.
    pub fn into_result<T: PacketCodec>(self) -> Result<Result<T, String>, CodecError> {
        match self {
            Acknowledgement::Result(bytes) => {
                let value = serde_json::from_slice(&bytes)?;
                T::from_plain(value).map(Ok)
            }
            Acknowledgement::Error(e) => {
                tracing::warn!("Counterparty rejected dex packet: {e}");
                Ok(Err(e))
            }
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

/// Standard base64 helper shared with callers that display raw acks.
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
