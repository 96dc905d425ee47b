#![allow(missing_docs)]
//! Error types exposed by this package.

use reqwest::StatusCode;

/// Errors while encoding or decoding packet payloads
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("Malformed protobuf payload: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("Requested decode length {length} exceeds the {available} bytes available")]
    LengthOutOfBounds { length: usize, available: usize },
    #[error("Dex packet envelope carries no payload")]
    EmptyPacket,
    #[error("Dex packet envelope carries more than one payload: {}", .0.join(", "))]
    MultiplePackets(Vec<&'static str>),
    #[error("Invalid plain object: {0}")]
    PlainObject(#[from] serde_json::Error),
}

/// Errors raised while constructing a [crate::TxClient]
#[derive(thiserror::Error, Debug)]
pub enum TxClientError {
    #[error("wallet is required")]
    MissingWallet,
    #[error("Wallet does not expose any accounts")]
    NoAccounts,
    #[error("Unable to load wallet accounts: {0:?}")]
    Accounts(anyhow::Error),
}

/// Problems parsing a bech32 address
#[derive(thiserror::Error, Debug)]
pub enum AddressError {
    #[error("Invalid bech32 address {address:?}: {source}")]
    Bech32 {
        address: String,
        source: bech32::Error,
    },
    #[error("Address {address:?} uses bech32m, expected bech32")]
    Bech32m { address: String },
    #[error("Address {address:?} holds {len} bytes, expected 20 or 32")]
    Length { address: String, len: usize },
    #[error("Invalid human readable part {hrp:?}: {source}")]
    Hrp { hrp: String, source: bech32::Error },
}

/// Problems with a dex transaction message
#[derive(thiserror::Error, Debug)]
pub enum MessageError {
    #[error("Invalid creator address {creator:?}: {source}")]
    InvalidCreator {
        creator: String,
        source: AddressError,
    },
    #[error("Field {field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("Field {field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i32 },
    #[error("Order ID must not be negative, got {0}")]
    NegativeOrderId(i32),
    #[error("Unknown dex message type URL: {0}")]
    UnknownTypeUrl(String),
    #[error("Unable to decode {type_url}: {source}")]
    Decode {
        type_url: String,
        source: prost::DecodeError,
    },
}

/// Errors from the REST query client
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Invalid REST URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP error while querying {url}: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("Query {url} returned status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Unable to parse JSON response from {url}: {source}. Body: {body}")]
    Json {
        url: String,
        body: String,
        source: serde_json::Error,
    },
    #[error("Unable to build HTTP client: {0}")]
    Builder(reqwest::Error),
}
