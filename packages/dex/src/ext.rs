use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cosmos_sdk_proto::cosmos::base::abci::v1beta1::TxResponse;

/// An IBC packet emitted by a dex transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPacket {
    pub sequence: u64,
    pub source_port: String,
    pub source_channel: String,
    pub destination_port: String,
    pub destination_channel: String,
}

pub trait TxResponseExt {
    /// Parse the timestamp of this transaction.
    fn parse_timestamp(&self) -> Result<DateTime<Utc>>;

    /// Return every IBC packet sent by this transaction.
    fn parse_sent_packets(&self) -> Result<Vec<SentPacket>>;
}

impl TxResponseExt for TxResponse {
    fn parse_timestamp(&self) -> Result<DateTime<Utc>> {
        self.timestamp.parse().with_context(|| {
            format!(
                "Could not parse timestamp from TxResponse: {}",
                self.timestamp
            )
        })
    }

    fn parse_sent_packets(&self) -> Result<Vec<SentPacket>> {
        let mut packets = vec![];

        for log in &self.logs {
            for event in &log.events {
                if event.r#type != "send_packet" {
                    continue;
                }
                let get = |key: &str| {
                    event
                        .attributes
                        .iter()
                        .find(|attr| attr.key == key)
                        .map(|attr| attr.value.clone())
                        .with_context(|| {
                            format!("send_packet event in {} is missing {key}", self.txhash)
                        })
                };
                let sequence = get("packet_sequence")?;
                packets.push(SentPacket {
                    sequence: sequence
                        .parse()
                        .with_context(|| format!("Invalid packet sequence {sequence:?}"))?,
                    source_port: get("packet_src_port")?,
                    source_channel: get("packet_src_channel")?,
                    destination_port: get("packet_dst_port")?,
                    destination_channel: get("packet_dst_channel")?,
                });
            }
        }

        Ok(packets)
    }
}
