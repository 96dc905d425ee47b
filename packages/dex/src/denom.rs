//! Denomination helpers matching what the dex module computes on chain.

use sha2::{Digest, Sha256};

/// Prefix of denominations minted by IBC.
pub const IBC_PREFIX: &str = "ibc/";

/// Length of the truncated voucher denoms stored by the module, prefix included.
const VOUCHER_DENOM_LEN: usize = 16;

/// Key of the order book for a pair traded over the given port and channel.
pub fn order_book_index(port: &str, channel: &str, amount_denom: &str, price_denom: &str) -> String {
    format!("{port}-{channel}-{amount_denom}-{price_denom}")
}

/// Voucher denom minted for `denom` arriving over `port`/`channel`.
///
/// This is the IBC denom hash of `{port}/{channel}/{denom}`, truncated the
/// same way the module does.
pub fn voucher_denom(port: &str, channel: &str, denom: &str) -> String {
    let hash = Sha256::digest(format!("{port}/{channel}/{denom}").as_bytes());
    let mut voucher = format!("{IBC_PREFIX}{}", hex::encode_upper(hash));
    voucher.truncate(VOUCHER_DENOM_LEN);
    voucher
}

/// Whether this denom is an IBC voucher rather than a native token.
pub fn is_ibc_token(denom: &str) -> bool {
    denom.starts_with(IBC_PREFIX)
}
