//! IBC packet payloads sent between dex modules on different chains.
//!
//! The wire types mirror the module's `packet.proto`. Application code should
//! usually work with [DexPacket], which makes the "exactly one payload"
//! expectation of the envelope explicit.

use prost::{
    bytes::{Buf, BufMut},
    encoding::{skip_field, DecodeContext, WireType},
    Message,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::error::CodecError;

/// Uniform encode/decode operations shared by every packet and acknowledgment type.
pub trait PacketCodec: Message + Default + Serialize + DeserializeOwned {
    /// Encode to protobuf bytes. Fields holding their default value are omitted.
    fn encode_packet(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Decode from protobuf bytes.
    ///
    /// When `length` is provided only that many bytes are consumed; it is an
    /// error for it to exceed the buffer. Unknown fields are skipped.
    fn decode_packet(buf: &[u8], length: Option<usize>) -> Result<Self, CodecError> {
        let buf = match length {
            None => buf,
            Some(length) => buf.get(..length).ok_or(CodecError::LengthOutOfBounds {
                length,
                available: buf.len(),
            })?,
        };
        Ok(Self::decode(buf)?)
    }

    /// Parse from a JSON object, with absent or `null` keys taking defaults.
    fn from_plain(value: serde_json::Value) -> Result<Self, CodecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Project into a JSON object, omitting default-valued fields.
    fn to_plain(&self) -> Result<serde_json::Value, CodecError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Construction from a partially populated value.
pub trait FromPartial: Sized {
    /// Same shape as `Self`, with every field optional.
    type Partial: Default;

    /// Fill every absent field with its default.
    fn from_partial(partial: Self::Partial) -> Self;
}

/// Envelope for every packet sent by the dex module.
///
/// Every occurrence of a payload field on the wire replaces the payload
/// entirely, including a repeat of the same field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlainDexPacketData", into = "PlainDexPacketData")]
pub struct DexPacketData {
    pub packet: Option<dex_packet_data::Packet>,
}

impl Message for DexPacketData {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        if let Some(packet) = &self.packet {
            packet.encode(buf);
        }
    }

    fn merge_field<B>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), prost::DecodeError>
    where
        B: Buf,
    {
        match tag {
            1..=4 => {
                let mut packet = None;
                dex_packet_data::Packet::merge(&mut packet, tag, wire_type, buf, ctx)?;
                self.packet = packet;
                Ok(())
            }
            _ => skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        self.packet.as_ref().map_or(0, dex_packet_data::Packet::encoded_len)
    }

    fn clear(&mut self) {
        self.packet = None;
    }
}

/// Nested types for [DexPacketData].
pub mod dex_packet_data {
    /// The single payload carried by a [super::DexPacketData].
    #[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
    pub enum Packet {
        #[prost(message, tag = "1")]
        NoData(super::NoData),
        #[prost(message, tag = "2")]
        CreatePairPacket(super::CreatePairPacketData),
        #[prost(message, tag = "3")]
        SellOrderPacket(super::SellOrderPacketData),
        #[prost(message, tag = "4")]
        BuyOrderPacket(super::BuyOrderPacketData),
    }
}

/// Empty placeholder payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoData {}

/// Request to register a trading pair on the counterparty chain.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePairPacketData {
    #[prost(string, tag = "1")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub source_denom: String,
    #[prost(string, tag = "2")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub target_denom: String,
}

/// A sell order forwarded to the chain holding the matching order book.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellOrderPacketData {
    #[prost(string, tag = "1")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub amount_denom: String,
    #[prost(int32, tag = "2")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub amount: i32,
    #[prost(string, tag = "3")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub price_denom: String,
    #[prost(int32, tag = "4")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub price: i32,
    #[prost(string, tag = "5")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub seller: String,
}

/// A buy order forwarded to the chain holding the matching order book.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuyOrderPacketData {
    #[prost(string, tag = "1")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub amount_denom: String,
    #[prost(int32, tag = "2")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub amount: i32,
    #[prost(string, tag = "3")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub price_denom: String,
    #[prost(int32, tag = "4")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub price: i32,
    #[prost(string, tag = "5")]
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub buyer: String,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_zero(x: &i32) -> bool {
    *x == 0
}

/// JSON shape of [DexPacketData], one optional key per payload.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PlainDexPacketData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    no_data: Option<NoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    create_pair_packet: Option<CreatePairPacketData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sell_order_packet: Option<SellOrderPacketData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    buy_order_packet: Option<BuyOrderPacketData>,
}

impl TryFrom<PlainDexPacketData> for DexPacketData {
    type Error = CodecError;

    fn try_from(
        PlainDexPacketData {
            no_data,
            create_pair_packet,
            sell_order_packet,
            buy_order_packet,
        }: PlainDexPacketData,
    ) -> Result<Self, Self::Error> {
        use dex_packet_data::Packet;

        let mut found = vec![];
        if let Some(x) = no_data {
            found.push(("noData", Packet::NoData(x)));
        }
        if let Some(x) = create_pair_packet {
            found.push(("createPairPacket", Packet::CreatePairPacket(x)));
        }
        if let Some(x) = sell_order_packet {
            found.push(("sellOrderPacket", Packet::SellOrderPacket(x)));
        }
        if let Some(x) = buy_order_packet {
            found.push(("buyOrderPacket", Packet::BuyOrderPacket(x)));
        }

        if found.len() > 1 {
            return Err(CodecError::MultiplePackets(
                found.into_iter().map(|(name, _)| name).collect(),
            ));
        }
        Ok(DexPacketData {
            packet: found.pop().map(|(_, packet)| packet),
        })
    }
}

impl From<DexPacketData> for PlainDexPacketData {
    fn from(DexPacketData { packet }: DexPacketData) -> Self {
        use dex_packet_data::Packet;

        let mut plain = PlainDexPacketData::default();
        match packet {
            None => (),
            Some(Packet::NoData(x)) => plain.no_data = Some(x),
            Some(Packet::CreatePairPacket(x)) => plain.create_pair_packet = Some(x),
            Some(Packet::SellOrderPacket(x)) => plain.sell_order_packet = Some(x),
            Some(Packet::BuyOrderPacket(x)) => plain.buy_order_packet = Some(x),
        }
        plain
    }
}

impl PacketCodec for DexPacketData {}
impl PacketCodec for NoData {}
impl PacketCodec for CreatePairPacketData {}
impl PacketCodec for SellOrderPacketData {}
impl PacketCodec for BuyOrderPacketData {}

/// A packet payload with exactly one variant populated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DexPacket {
    /// The `noData` placeholder
    Empty,
    CreatePair(CreatePairPacketData),
    SellOrder(SellOrderPacketData),
    BuyOrder(BuyOrderPacketData),
}

impl DexPacket {
    /// Short name of the active variant, matching the JSON key.
    pub fn kind(&self) -> &'static str {
        match self {
            DexPacket::Empty => "noData",
            DexPacket::CreatePair(_) => "createPairPacket",
            DexPacket::SellOrder(_) => "sellOrderPacket",
            DexPacket::BuyOrder(_) => "buyOrderPacket",
        }
    }

    /// Encode inside a [DexPacketData] envelope.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        DexPacketData::from(self.clone()).encode_packet()
    }

    /// Decode an envelope, rejecting one that carries no payload.
    pub fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        DexPacketData::decode_packet(buf, None)?.try_into()
    }
}

impl From<DexPacket> for DexPacketData {
    fn from(packet: DexPacket) -> Self {
        use dex_packet_data::Packet;

        DexPacketData {
            packet: Some(match packet {
                DexPacket::Empty => Packet::NoData(NoData {}),
                DexPacket::CreatePair(x) => Packet::CreatePairPacket(x),
                DexPacket::SellOrder(x) => Packet::SellOrderPacket(x),
                DexPacket::BuyOrder(x) => Packet::BuyOrderPacket(x),
            }),
        }
    }
}

impl TryFrom<DexPacketData> for DexPacket {
    type Error = CodecError;

    fn try_from(DexPacketData { packet }: DexPacketData) -> Result<Self, Self::Error> {
        use dex_packet_data::Packet;

        match packet {
            None => Err(CodecError::EmptyPacket),
            Some(Packet::NoData(NoData {})) => Ok(DexPacket::Empty),
            Some(Packet::CreatePairPacket(x)) => Ok(DexPacket::CreatePair(x)),
            Some(Packet::SellOrderPacket(x)) => Ok(DexPacket::SellOrder(x)),
            Some(Packet::BuyOrderPacket(x)) => Ok(DexPacket::BuyOrder(x)),
        }
    }
}

impl From<CreatePairPacketData> for DexPacket {
    fn from(x: CreatePairPacketData) -> Self {
        DexPacket::CreatePair(x)
    }
}

impl From<SellOrderPacketData> for DexPacket {
    fn from(x: SellOrderPacketData) -> Self {
        DexPacket::SellOrder(x)
    }
}

impl From<BuyOrderPacketData> for DexPacket {
    fn from(x: BuyOrderPacketData) -> Self {
        DexPacket::BuyOrder(x)
    }
}

/// Partial form of [DexPacketData].
///
/// If several payloads are given, the highest numbered one is kept, the same
/// way a decoder resolves a buffer containing all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialDexPacketData {
    pub no_data: Option<NoData>,
    pub create_pair_packet: Option<PartialCreatePairPacketData>,
    pub sell_order_packet: Option<PartialSellOrderPacketData>,
    pub buy_order_packet: Option<PartialBuyOrderPacketData>,
}

impl FromPartial for DexPacketData {
    type Partial = PartialDexPacketData;

    fn from_partial(
        PartialDexPacketData {
            no_data,
            create_pair_packet,
            sell_order_packet,
            buy_order_packet,
        }: PartialDexPacketData,
    ) -> Self {
        use dex_packet_data::Packet;

        let packet = buy_order_packet
            .map(|x| Packet::BuyOrderPacket(BuyOrderPacketData::from_partial(x)))
            .or_else(|| {
                sell_order_packet
                    .map(|x| Packet::SellOrderPacket(SellOrderPacketData::from_partial(x)))
            })
            .or_else(|| {
                create_pair_packet
                    .map(|x| Packet::CreatePairPacket(CreatePairPacketData::from_partial(x)))
            })
            .or_else(|| no_data.map(Packet::NoData));
        DexPacketData { packet }
    }
}

impl FromPartial for NoData {
    type Partial = NoData;

    fn from_partial(_: NoData) -> Self {
        NoData {}
    }
}

/// Partial form of [CreatePairPacketData].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialCreatePairPacketData {
    pub source_denom: Option<String>,
    pub target_denom: Option<String>,
}

impl FromPartial for CreatePairPacketData {
    type Partial = PartialCreatePairPacketData;

    fn from_partial(partial: PartialCreatePairPacketData) -> Self {
        CreatePairPacketData {
            source_denom: partial.source_denom.unwrap_or_default(),
            target_denom: partial.target_denom.unwrap_or_default(),
        }
    }
}

/// Partial form of [SellOrderPacketData].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialSellOrderPacketData {
    pub amount_denom: Option<String>,
    pub amount: Option<i32>,
    pub price_denom: Option<String>,
    pub price: Option<i32>,
    pub seller: Option<String>,
}

impl FromPartial for SellOrderPacketData {
    type Partial = PartialSellOrderPacketData;

    fn from_partial(partial: PartialSellOrderPacketData) -> Self {
        SellOrderPacketData {
            amount_denom: partial.amount_denom.unwrap_or_default(),
            amount: partial.amount.unwrap_or_default(),
            price_denom: partial.price_denom.unwrap_or_default(),
            price: partial.price.unwrap_or_default(),
            seller: partial.seller.unwrap_or_default(),
        }
    }
}

/// Partial form of [BuyOrderPacketData].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialBuyOrderPacketData {
    pub amount_denom: Option<String>,
    pub amount: Option<i32>,
    pub price_denom: Option<String>,
    pub price: Option<i32>,
    pub buyer: Option<String>,
}

impl FromPartial for BuyOrderPacketData {
    type Partial = PartialBuyOrderPacketData;

    fn from_partial(partial: PartialBuyOrderPacketData) -> Self {
        BuyOrderPacketData {
            amount_denom: partial.amount_denom.unwrap_or_default(),
            amount: partial.amount.unwrap_or_default(),
            price_denom: partial.price_denom.unwrap_or_default(),
            price: partial.price.unwrap_or_default(),
            buyer: partial.buyer.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::Arbitrary;
    use serde_json::json;

    use super::*;

    fn atom_osmo() -> CreatePairPacketData {
        CreatePairPacketData {
            source_denom: "atom".to_owned(),
            target_denom: "osmo".to_owned(),
        }
    }

    #[test]
    fn create_pair_spot_roundtrip() {
        let bytes = atom_osmo().encode_packet();
        assert_eq!(bytes, b"\x0a\x04atom\x12\x04osmo");
        let decoded = CreatePairPacketData::decode_packet(&bytes, None).unwrap();
        assert_eq!(decoded, atom_osmo());
    }

    #[test]
    fn defaults_are_omitted() {
        assert!(CreatePairPacketData::default().encode_packet().is_empty());
        let decoded = CreatePairPacketData::decode_packet(&[], None).unwrap();
        assert_eq!(decoded.source_denom, "");
        assert_eq!(decoded.target_denom, "");
        assert!(NoData {}.encode_packet().is_empty());
    }

    #[test]
    fn envelope_with_create_pair_has_no_field_one() {
        let bytes = DexPacket::CreatePair(atom_osmo()).encode_to_vec();
        assert_eq!(bytes[0], 0x12);
        assert_eq!(bytes[1] as usize, bytes.len() - 2);
        assert_eq!(DexPacket::decode(&bytes).unwrap(), DexPacket::CreatePair(atom_osmo()));
    }

    #[test]
    fn envelope_no_data() {
        let bytes = DexPacket::Empty.encode_to_vec();
        assert_eq!(bytes, [0x0a, 0x00]);
        assert_eq!(DexPacket::decode(&bytes).unwrap(), DexPacket::Empty);
    }

    #[test]
    fn empty_envelope_is_rejected_as_packet() {
        let data = DexPacketData::decode_packet(&[], None).unwrap();
        assert_eq!(data.packet, None);
        assert!(matches!(DexPacket::decode(&[]), Err(CodecError::EmptyPacket)));
    }

    #[test]
    fn last_field_on_the_wire_wins() {
        let mut bytes = DexPacket::Empty.encode_to_vec();
        bytes.extend(DexPacket::CreatePair(atom_osmo()).encode_to_vec());
        assert_eq!(DexPacket::decode(&bytes).unwrap(), DexPacket::CreatePair(atom_osmo()));

        let mut bytes = DexPacket::CreatePair(atom_osmo()).encode_to_vec();
        bytes.extend(DexPacket::Empty.encode_to_vec());
        assert_eq!(DexPacket::decode(&bytes).unwrap(), DexPacket::Empty);
    }

    #[test]
    fn repeated_payload_field_replaces() {
        let first = DexPacket::CreatePair(CreatePairPacketData {
            source_denom: "atom".to_owned(),
            target_denom: String::new(),
        });
        let second = DexPacket::CreatePair(CreatePairPacketData {
            source_denom: String::new(),
            target_denom: "osmo".to_owned(),
        });
        let mut bytes = first.encode_to_vec();
        bytes.extend(second.encode_to_vec());
        assert_eq!(DexPacket::decode(&bytes).unwrap(), second);

        let sell = |amount| {
            DexPacket::SellOrder(SellOrderPacketData {
                amount,
                ..Default::default()
            })
        };
        let mut bytes = sell(5).encode_to_vec();
        bytes.extend(DexPacket::SellOrder(SellOrderPacketData::default()).encode_to_vec());
        assert_eq!(
            DexPacket::decode(&bytes).unwrap(),
            DexPacket::SellOrder(SellOrderPacketData::default())
        );
        assert_eq!(DexPacket::decode(&sell(5).encode_to_vec()).unwrap(), sell(5));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        // field 1 sent as a varint instead of a string
        assert!(matches!(
            CreatePairPacketData::decode_packet(&[0x08, 0x01], None),
            Err(CodecError::Decode(_))
        ));
        // field 1 holding invalid UTF-8
        assert!(matches!(
            CreatePairPacketData::decode_packet(&[0x0a, 0x01, 0xff], None),
            Err(CodecError::Decode(_))
        ));
        // payload field 2 sent as a varint
        assert!(matches!(
            DexPacketData::decode_packet(&[0x10, 0x01], None),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn unknown_fields_are_skipped() {
        // field 99, wire type 0, value 150
        const UNKNOWN: [u8; 4] = [0x98, 0x06, 0x96, 0x01];

        let mut bytes = vec![];
        bytes.extend(b"\x0a\x04atom");
        bytes.extend(UNKNOWN);
        bytes.extend(b"\x12\x04osmo");
        assert_eq!(
            CreatePairPacketData::decode_packet(&bytes, None).unwrap(),
            atom_osmo()
        );

        let mut envelope = UNKNOWN.to_vec();
        envelope.extend(DexPacket::CreatePair(atom_osmo()).encode_to_vec());
        assert_eq!(
            DexPacket::decode(&envelope).unwrap(),
            DexPacket::CreatePair(atom_osmo())
        );

        // length-delimited unknown field inside NoData
        assert_eq!(
            NoData::decode_packet(&[0x1a, 0x02, 0xff, 0xff], None).unwrap(),
            NoData {}
        );
    }

    #[test]
    fn truncated_input_fails() {
        let bytes = atom_osmo().encode_packet();
        for len in 1..bytes.len() {
            if len == 6 {
                // exactly the first field
                continue;
            }
            assert!(
                matches!(
                    CreatePairPacketData::decode_packet(&bytes[..len], None),
                    Err(CodecError::Decode(_))
                ),
                "length {len}"
            );
        }

        let envelope = DexPacket::CreatePair(atom_osmo()).encode_to_vec();
        let truncated = &envelope[..envelope.len() - 3];
        assert!(matches!(
            DexPacketData::decode_packet(truncated, None),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn explicit_length() {
        let mut bytes = atom_osmo().encode_packet();
        let first_field = 6;
        bytes.extend([0xff, 0xff, 0xff]);
        let decoded = CreatePairPacketData::decode_packet(&bytes, Some(first_field)).unwrap();
        assert_eq!(decoded.source_denom, "atom");
        assert_eq!(decoded.target_denom, "");

        assert!(matches!(
            CreatePairPacketData::decode_packet(&bytes, Some(bytes.len() + 1)),
            Err(CodecError::LengthOutOfBounds { .. })
        ));
    }

    #[test]
    fn order_packets_roundtrip() {
        let sell = SellOrderPacketData {
            amount_denom: "marscoin".to_owned(),
            amount: 10,
            price_denom: "venuscoin".to_owned(),
            price: 15,
            seller: "cosmos1seller".to_owned(),
        };
        let packet = DexPacket::SellOrder(sell);
        assert_eq!(DexPacket::decode(&packet.encode_to_vec()).unwrap(), packet);

        let buy = BuyOrderPacketData {
            amount_denom: "marscoin".to_owned(),
            amount: -3,
            price_denom: "venuscoin".to_owned(),
            price: 5,
            buyer: "cosmos1buyer".to_owned(),
        };
        let packet = DexPacket::BuyOrder(buy);
        assert_eq!(DexPacket::decode(&packet.encode_to_vec()).unwrap(), packet);
    }

    #[test]
    fn plain_object_projection() {
        let data = DexPacketData::from(DexPacket::CreatePair(atom_osmo()));
        assert_eq!(
            data.to_plain().unwrap(),
            json!({"createPairPacket": {"sourceDenom": "atom", "targetDenom": "osmo"}})
        );
        assert_eq!(
            DexPacketData::from(DexPacket::Empty).to_plain().unwrap(),
            json!({"noData": {}})
        );
        assert_eq!(DexPacketData::default().to_plain().unwrap(), json!({}));
        assert_eq!(
            CreatePairPacketData {
                source_denom: "atom".to_owned(),
                target_denom: String::new(),
            }
            .to_plain()
            .unwrap(),
            json!({"sourceDenom": "atom"})
        );
    }

    #[test]
    fn plain_object_defaults() {
        let parsed =
            CreatePairPacketData::from_plain(json!({"sourceDenom": null, "targetDenom": "osmo"}))
                .unwrap();
        assert_eq!(parsed.source_denom, "");
        assert_eq!(parsed.target_denom, "osmo");

        let parsed =
            DexPacketData::from_plain(json!({"noData": null, "createPairPacket": {}})).unwrap();
        assert_eq!(
            parsed.packet,
            Some(dex_packet_data::Packet::CreatePairPacket(
                CreatePairPacketData::default()
            ))
        );
    }

    #[test]
    fn plain_object_is_validated() {
        assert!(CreatePairPacketData::from_plain(json!({"sourceDenom": 5})).is_err());
        assert!(CreatePairPacketData::from_plain(json!({"bogus": "x"})).is_err());
        assert!(SellOrderPacketData::from_plain(json!({"amount": "ten"})).is_err());
        assert!(DexPacketData::from_plain(json!({"noData": {}, "createPairPacket": {}})).is_err());
    }

    #[test]
    fn from_partial_fills_defaults() {
        let data = CreatePairPacketData::from_partial(PartialCreatePairPacketData {
            source_denom: Some("atom".to_owned()),
            target_denom: None,
        });
        assert_eq!(data.source_denom, "atom");
        assert_eq!(data.target_denom, "");

        let envelope = DexPacketData::from_partial(PartialDexPacketData {
            no_data: Some(NoData {}),
            create_pair_packet: Some(PartialCreatePairPacketData::default()),
            ..Default::default()
        });
        assert_eq!(
            envelope.packet,
            Some(dex_packet_data::Packet::CreatePairPacket(
                CreatePairPacketData::default()
            ))
        );
        assert_eq!(
            DexPacketData::from_partial(PartialDexPacketData::default()).packet,
            None
        );

        let sell = SellOrderPacketData::from_partial(PartialSellOrderPacketData {
            price: Some(7),
            ..Default::default()
        });
        assert_eq!(sell.price, 7);
        assert_eq!(sell.amount, 0);
        assert_eq!(sell.seller, "");
    }

    #[derive(Clone, Debug)]
    struct Denom(String);

    impl Arbitrary for Denom {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let sizes = (1..20).collect::<Vec<_>>();
            let chars = ('a'..='z').chain('0'..='9').chain(['/', '-']).collect::<Vec<_>>();
            Denom(
                (0..*g.choose(&sizes).unwrap())
                    .map(|_| *g.choose(&chars).unwrap())
                    .collect(),
            )
        }
    }

    quickcheck::quickcheck! {
        fn roundtrip_create_pair(source_denom: String, target_denom: String) -> bool {
            let expected = CreatePairPacketData { source_denom, target_denom };
            let actual = CreatePairPacketData::decode_packet(&expected.encode_packet(), None).unwrap();
            assert_eq!(expected, actual);
            true
        }

        fn roundtrip_envelope(source: Denom, target: Denom) -> bool {
            let expected = DexPacket::CreatePair(CreatePairPacketData {
                source_denom: source.0,
                target_denom: target.0,
            });
            assert_eq!(DexPacket::decode(&expected.encode_to_vec()).unwrap(), expected);
            true
        }

        fn plain_object_idempotent(source: Denom, target: Denom) -> bool {
            let obj = json!({"sourceDenom": source.0, "targetDenom": target.0});
            let parsed = CreatePairPacketData::from_plain(obj.clone()).unwrap();
            assert_eq!(parsed.to_plain().unwrap(), obj);
            true
        }
    }
}
