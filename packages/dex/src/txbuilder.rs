use std::fmt::Display;

use anyhow::Result;
use cosmos_sdk_proto::cosmos::{
    base::{abci::v1beta1::TxResponse, v1beta1::Coin},
    tx::v1beta1::Fee,
};

use crate::{OfflineSigner, SigningBackend, TxClient};

/// Gas limit used when no fee is given.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// The fee used when none is specified: no coins, [DEFAULT_GAS_LIMIT] gas.
pub fn default_fee() -> Fee {
    Fee {
        amount: vec![],
        gas_limit: DEFAULT_GAS_LIMIT,
        payer: String::new(),
        granter: String::new(),
    }
}

/// Fee and memo for a single broadcast.
#[derive(Clone, Debug, PartialEq)]
pub struct SignAndBroadcastOptions {
    pub fee: Fee,
    pub memo: String,
}

impl Default for SignAndBroadcastOptions {
    fn default() -> Self {
        SignAndBroadcastOptions {
            fee: default_fee(),
            memo: String::new(),
        }
    }
}

/// Transaction builder
///
/// Collects dex messages and broadcasts them together through a [TxClient].
#[derive(Default, Clone, Debug)]
pub struct TxBuilder {
    messages: Vec<TypedMessage>,
    memo: Option<String>,
    fee: Option<Fee>,
    skip_code_check: bool,
}

impl Display for TxBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (idx, msg) in self.messages.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", msg.type_url(), msg.description())?;
        }
        if let Some(memo) = &self.memo {
            write!(f, "\nmemo: {memo}")?;
        }
        Ok(())
    }
}

impl TxBuilder {
    /// Add a message to this transaction.
    pub fn add_message(&mut self, msg: impl Into<TypedMessage>) -> &mut Self {
        self.messages.push(msg.into());
        self
    }

    /// Messages added so far.
    pub fn messages(&self) -> &[TypedMessage] {
        &self.messages
    }

    /// Set the memo field.
    pub fn set_memo(&mut self, memo: impl Into<String>) -> &mut Self {
        self.memo = Some(memo.into());
        self
    }

    /// Clear the memo field
    pub fn clear_memo(&mut self) -> &mut Self {
        self.memo = None;
        self
    }

    /// Either set or clear the memo field.
    pub fn set_optional_memo(&mut self, memo: impl Into<Option<String>>) -> &mut Self {
        self.memo = memo.into();
        self
    }

    /// Set the fee. Without one, [default_fee] is used.
    pub fn set_fee(&mut self, amount: Vec<Coin>, gas_limit: u64) -> &mut Self {
        self.fee = Some(Fee {
            amount,
            gas_limit,
            payer: String::new(),
            granter: String::new(),
        });
        self
    }

    /// When calling [TxBuilder::sign_and_broadcast], skip the check of whether the code is 0
    pub fn set_skip_code_check(&mut self, skip_code_check: bool) -> &mut Self {
        self.skip_code_check = skip_code_check;
        self
    }

    /// The options that [TxBuilder::sign_and_broadcast] will use.
    pub fn options(&self) -> SignAndBroadcastOptions {
        SignAndBroadcastOptions {
            fee: self.fee.clone().unwrap_or_else(default_fee),
            memo: self.memo.clone().unwrap_or_default(),
        }
    }

    /// Sign and broadcast all messages, failing if the chain reports a non-zero code.
    pub async fn sign_and_broadcast<W, B>(&self, client: &TxClient<W, B>) -> Result<TxResponse>
    where
        W: OfflineSigner,
        B: SigningBackend,
    {
        anyhow::ensure!(
            !self.messages.is_empty(),
            "Cannot broadcast a transaction without messages"
        );
        let res = client
            .sign_and_broadcast(self.messages.clone(), self.options())
            .await?;
        if !self.skip_code_check && res.code != 0 {
            anyhow::bail!(
                "Transaction {} failed with code {} in codespace {}: {}",
                res.txhash,
                res.code,
                res.codespace,
                res.raw_log
            );
        }
        Ok(res)
    }
}

/// A message to include in a transaction, including the type URL string.
#[derive(Clone, Debug)]
pub struct TypedMessage {
    inner: cosmos_sdk_proto::Any,
    description: String,
}

impl TypedMessage {
    pub fn new(
        type_url: impl Into<String>,
        value: Vec<u8>,
        description: impl Into<String>,
    ) -> Self {
        TypedMessage {
            inner: cosmos_sdk_proto::Any {
                type_url: type_url.into(),
                value,
            },
            description: description.into(),
        }
    }

    pub fn type_url(&self) -> &str {
        &self.inner.type_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_inner(self) -> cosmos_sdk_proto::Any {
        self.inner
    }
}
