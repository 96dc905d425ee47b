//! Signing and broadcasting facade for dex transactions.
//!
//! Key management and the actual signing client are provided by the caller
//! through [OfflineSigner] and [SigningBackend].

use anyhow::{Context, Result};
use async_trait::async_trait;
use cosmos_sdk_proto::{cosmos::base::abci::v1beta1::TxResponse, cosmos::tx::v1beta1::Fee, Any};

use crate::{
    error::TxClientError, Address, HasAddress, MsgCancelBuyOrder, MsgCancelSellOrder,
    MsgSendBuyOrder, MsgSendCreatePair, MsgSendSellOrder, SignAndBroadcastOptions, TypedMessage,
};

/// An account exposed by a wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountData {
    pub address: Address,
    /// Compressed secp256k1 public key
    pub pubkey: Vec<u8>,
}

impl HasAddress for AccountData {
    fn get_address(&self) -> Address {
        self.address.clone()
    }
}

/// Wallet able to sign on behalf of its accounts.
#[async_trait]
pub trait OfflineSigner: Send + Sync {
    /// Accounts held by this wallet. The first one signs dex transactions.
    async fn accounts(&self) -> Result<Vec<AccountData>>;
}

/// Signs a transaction with a wallet and submits it to the chain.
#[async_trait]
pub trait SigningBackend: Send + Sync {
    async fn sign_and_broadcast(
        &self,
        wallet: &dyn OfflineSigner,
        signer: &Address,
        messages: Vec<Any>,
        fee: Fee,
        memo: String,
    ) -> Result<TxResponse>;
}

/// Client for submitting dex transactions from a single account.
pub struct TxClient<W, B> {
    wallet: W,
    backend: B,
    address: Address,
}

impl<W: OfflineSigner, B: SigningBackend> TxClient<W, B> {
    /// Create a client signing with the wallet's first account.
    ///
    /// Fails with [TxClientError::MissingWallet] before touching the backend if
    /// no wallet is given.
    pub async fn new(wallet: Option<W>, backend: B) -> Result<Self, TxClientError> {
        let wallet = wallet.ok_or(TxClientError::MissingWallet)?;
        let address = wallet
            .accounts()
            .await
            .map_err(TxClientError::Accounts)?
            .into_iter()
            .next()
            .ok_or(TxClientError::NoAccounts)?
            .address;
        tracing::debug!("Dex transactions will be signed by {address}");
        Ok(TxClient {
            wallet,
            backend,
            address,
        })
    }

    /// Address signing the transactions.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Sign and broadcast the given messages. Backend errors are passed through.
    pub async fn sign_and_broadcast(
        &self,
        messages: Vec<TypedMessage>,
        SignAndBroadcastOptions { fee, memo }: SignAndBroadcastOptions,
    ) -> Result<TxResponse> {
        for msg in &messages {
            tracing::debug!("Broadcasting {}: {}", msg.type_url(), msg.description());
        }
        let messages = messages.into_iter().map(TypedMessage::into_inner).collect();
        let res = self
            .backend
            .sign_and_broadcast(&self.wallet, &self.address, messages, fee, memo)
            .await
            .with_context(|| format!("Broadcasting dex transaction from {}", self.address))?;
        tracing::debug!("Broadcast result: txhash {} code {}", res.txhash, res.code);
        Ok(res)
    }

    pub fn msg_send_create_pair(&self, mut msg: MsgSendCreatePair) -> TypedMessage {
        self.fill_creator(&mut msg.creator);
        msg.into()
    }

    pub fn msg_cancel_buy_order(&self, mut msg: MsgCancelBuyOrder) -> TypedMessage {
        self.fill_creator(&mut msg.creator);
        msg.into()
    }

    pub fn msg_send_buy_order(&self, mut msg: MsgSendBuyOrder) -> TypedMessage {
        self.fill_creator(&mut msg.creator);
        msg.into()
    }

    pub fn msg_cancel_sell_order(&self, mut msg: MsgCancelSellOrder) -> TypedMessage {
        self.fill_creator(&mut msg.creator);
        msg.into()
    }

    pub fn msg_send_sell_order(&self, mut msg: MsgSendSellOrder) -> TypedMessage {
        self.fill_creator(&mut msg.creator);
        msg.into()
    }

    /// Messages built with an empty creator are attributed to the signer.
    fn fill_creator(&self, creator: &mut String) {
        if creator.is_empty() {
            *creator = self.address.to_string();
        }
    }
}

impl<W, B> HasAddress for TxClient<W, B> {
    fn get_address(&self) -> Address {
        self.address.clone()
    }
}
