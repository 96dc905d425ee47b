use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use dex::{
    Acknowledgement, BuyOrderPacketAck, BuyOrderPacketData, CreatePairPacketAck,
    CreatePairPacketData, DexPacket, DexPacketData, NoData, PacketCodec, SellOrderPacketAck,
    SellOrderPacketData,
};

/// Payload types that can be encoded and decoded
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Kind {
    /// The DexPacketData envelope sent over the channel
    Envelope,
    NoData,
    CreatePair,
    SellOrder,
    BuyOrder,
    CreatePairAck,
    SellOrderAck,
    BuyOrderAck,
}

/// Acknowledgement types returned by the counterparty
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum AckKind {
    CreatePair,
    SellOrder,
    BuyOrder,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub(crate) enum Format {
    #[default]
    Hex,
    Base64,
}

impl Format {
    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Format::Hex => hex::encode(bytes),
            Format::Base64 => STANDARD.encode(bytes),
        }
    }

    fn decode(self, s: &str) -> Result<Vec<u8>> {
        match self {
            Format::Hex => hex::decode(s.trim()).with_context(|| format!("Invalid hex: {s:?}")),
            Format::Base64 => STANDARD
                .decode(s.trim())
                .with_context(|| format!("Invalid base64: {s:?}")),
        }
    }
}

#[derive(clap::Parser)]
pub(crate) struct Opt {
    #[clap(subcommand)]
    sub: Subcommand,
}

#[derive(clap::Parser)]
pub(crate) enum Subcommand {
    /// Encode a JSON payload to protobuf bytes
    Encode {
        #[clap(long, value_enum, default_value_t = Kind::Envelope)]
        kind: Kind,
        #[clap(long, value_enum, default_value_t)]
        format: Format,
        /// Payload (in JSON)
        json: String,
    },
    /// Decode protobuf bytes to a JSON payload
    Decode {
        #[clap(long, value_enum, default_value_t = Kind::Envelope)]
        kind: Kind,
        #[clap(long, value_enum, default_value_t)]
        format: Format,
        /// Only decode this many bytes from the start of the input
        #[clap(long)]
        length: Option<usize>,
        /// Pretty-print JSON output?
        #[clap(long)]
        pretty: bool,
        bytes: String,
    },
    /// Wrap a JSON ack in a successful channel acknowledgement
    WrapAck {
        #[clap(value_enum)]
        kind: AckKind,
        /// Ack (in JSON)
        json: String,
    },
    /// Read a channel acknowledgement
    ReadAck {
        #[clap(value_enum)]
        kind: AckKind,
        /// Raw acknowledgement (JSON)
        ack: String,
    },
}

fn encode<T: PacketCodec>(json: &str) -> Result<Vec<u8>> {
    let value = serde_json::from_str(json).context("Payload is not valid JSON")?;
    Ok(T::from_plain(value)?.encode_packet())
}

fn decode<T: PacketCodec>(bytes: &[u8], length: Option<usize>) -> Result<serde_json::Value> {
    Ok(T::decode_packet(bytes, length)?.to_plain()?)
}

impl Kind {
    fn encode(self, json: &str) -> Result<Vec<u8>> {
        match self {
            Kind::Envelope => encode::<DexPacketData>(json),
            Kind::NoData => encode::<NoData>(json),
            Kind::CreatePair => encode::<CreatePairPacketData>(json),
            Kind::SellOrder => encode::<SellOrderPacketData>(json),
            Kind::BuyOrder => encode::<BuyOrderPacketData>(json),
            Kind::CreatePairAck => encode::<CreatePairPacketAck>(json),
            Kind::SellOrderAck => encode::<SellOrderPacketAck>(json),
            Kind::BuyOrderAck => encode::<BuyOrderPacketAck>(json),
        }
    }

    fn decode(self, bytes: &[u8], length: Option<usize>) -> Result<serde_json::Value> {
        match self {
            Kind::Envelope => {
                let data = DexPacketData::decode_packet(bytes, length)?;
                match DexPacket::try_from(data.clone()) {
                    Ok(packet) => tracing::debug!("Envelope carries {}", packet.kind()),
                    Err(e) => tracing::warn!("{e}"),
                }
                Ok(data.to_plain()?)
            }
            Kind::NoData => decode::<NoData>(bytes, length),
            Kind::CreatePair => decode::<CreatePairPacketData>(bytes, length),
            Kind::SellOrder => decode::<SellOrderPacketData>(bytes, length),
            Kind::BuyOrder => decode::<BuyOrderPacketData>(bytes, length),
            Kind::CreatePairAck => decode::<CreatePairPacketAck>(bytes, length),
            Kind::SellOrderAck => decode::<SellOrderPacketAck>(bytes, length),
            Kind::BuyOrderAck => decode::<BuyOrderPacketAck>(bytes, length),
        }
    }
}

fn wrap_ack<T: PacketCodec>(json: &str) -> Result<Acknowledgement> {
    let value = serde_json::from_str(json).context("Ack is not valid JSON")?;
    Ok(Acknowledgement::success(&T::from_plain(value)?)?)
}

fn read_ack<T: PacketCodec>(ack: Acknowledgement) -> Result<Result<serde_json::Value, String>> {
    Ok(match ack.into_result::<T>()? {
        Ok(ack) => Ok(ack.to_plain()?),
        Err(e) => Err(e),
    })
}

impl AckKind {
    fn wrap(self, json: &str) -> Result<Acknowledgement> {
        match self {
            AckKind::CreatePair => wrap_ack::<CreatePairPacketAck>(json),
            AckKind::SellOrder => wrap_ack::<SellOrderPacketAck>(json),
            AckKind::BuyOrder => wrap_ack::<BuyOrderPacketAck>(json),
        }
    }

    fn read(self, ack: Acknowledgement) -> Result<Result<serde_json::Value, String>> {
        match self {
            AckKind::CreatePair => read_ack::<CreatePairPacketAck>(ack),
            AckKind::SellOrder => read_ack::<SellOrderPacketAck>(ack),
            AckKind::BuyOrder => read_ack::<BuyOrderPacketAck>(ack),
        }
    }
}

pub(crate) fn go(Opt { sub }: Opt) -> Result<()> {
    match sub {
        Subcommand::Encode { kind, format, json } => {
            let bytes = kind.encode(&json)?;
            println!("{}", format.encode(&bytes));
        }
        Subcommand::Decode {
            kind,
            format,
            length,
            pretty,
            bytes,
        } => {
            let bytes = format.decode(&bytes)?;
            let value = kind.decode(&bytes, length)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{value}");
            }
        }
        Subcommand::WrapAck { kind, json } => {
            let ack = kind.wrap(&json)?;
            println!("{}", String::from_utf8_lossy(&ack.to_bytes()?));
        }
        Subcommand::ReadAck { kind, ack } => {
            let ack = Acknowledgement::from_bytes(ack.as_bytes())?;
            match kind.read(ack)? {
                Ok(value) => println!("{value}"),
                Err(e) => anyhow::bail!("Packet was rejected by the counterparty: {e}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_hex() {
        let bytes = Kind::Envelope
            .encode(r#"{"createPairPacket": {"sourceDenom": "atom", "targetDenom": "osmo"}}"#)
            .unwrap();
        assert_eq!(Format::Hex.encode(&bytes), "120c0a0461746f6d12046f736d6f");
        let value = Kind::Envelope
            .decode(&Format::Hex.decode("120c0a0461746f6d12046f736d6f").unwrap(), None)
            .unwrap();
        assert_eq!(value["createPairPacket"]["targetDenom"], "osmo");
    }

    #[test]
    fn ack_wrapping() {
        let ack = AckKind::SellOrder
            .wrap(r#"{"remainingAmount": 3, "gain": 40}"#)
            .unwrap();
        let value = AckKind::SellOrder.read(ack).unwrap().unwrap();
        assert_eq!(value["gain"], 40);

        let rejected = Acknowledgement::Error("no such pair".to_owned());
        assert_eq!(
            AckKind::BuyOrder.read(rejected).unwrap(),
            Err("no such pair".to_owned())
        );
    }

    #[test]
    fn formats() {
        assert_eq!(Format::Base64.decode("CgA=").unwrap(), vec![0x0a, 0x00]);
        Format::Hex.decode("zz").unwrap_err();
    }
}
