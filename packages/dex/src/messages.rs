//! Transaction messages handled by the dex module.

use cosmos_sdk_proto::Any;
use prost::Message;

use crate::{error::MessageError, Address, TypedMessage};

/// Type URL of [MsgSendCreatePair]
pub const MSG_SEND_CREATE_PAIR: &str = "/interchangenel.dex.MsgSendCreatePair";
/// Type URL of [MsgSendSellOrder]
pub const MSG_SEND_SELL_ORDER: &str = "/interchangenel.dex.MsgSendSellOrder";
/// Type URL of [MsgSendBuyOrder]
pub const MSG_SEND_BUY_ORDER: &str = "/interchangenel.dex.MsgSendBuyOrder";
/// Type URL of [MsgCancelSellOrder]
pub const MSG_CANCEL_SELL_ORDER: &str = "/interchangenel.dex.MsgCancelSellOrder";
/// Type URL of [MsgCancelBuyOrder]
pub const MSG_CANCEL_BUY_ORDER: &str = "/interchangenel.dex.MsgCancelBuyOrder";

/// Every message type URL registered by the module.
pub const REGISTERED_TYPE_URLS: [&str; 5] = [
    MSG_SEND_CREATE_PAIR,
    MSG_CANCEL_BUY_ORDER,
    MSG_SEND_BUY_ORDER,
    MSG_CANCEL_SELL_ORDER,
    MSG_SEND_SELL_ORDER,
];

/// Common behavior of dex transaction messages.
pub trait DexMessage: Message + Default {
    /// Type URL used to route the message to its handler on chain.
    const TYPE_URL: &'static str;

    /// Stateless checks mirroring the module's `ValidateBasic`.
    fn validate_basic(&self) -> Result<(), MessageError>;

    /// Human readable summary, used in logs.
    fn describe(&self) -> String;

    /// The signer of this message.
    fn creator(&self) -> &str;
}

fn check_creator(creator: &str) -> Result<(), MessageError> {
    creator
        .parse::<Address>()
        .map(|_| ())
        .map_err(|source| MessageError::InvalidCreator {
            creator: creator.to_owned(),
            source,
        })
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), MessageError> {
    if value.is_empty() {
        Err(MessageError::EmptyField { field })
    } else {
        Ok(())
    }
}

fn check_positive(field: &'static str, value: i32) -> Result<(), MessageError> {
    if value > 0 {
        Ok(())
    } else {
        Err(MessageError::NotPositive { field, value })
    }
}

/// Send a create-pair packet over the given channel.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSendCreatePair {
    #[prost(string, tag = "1")]
    pub creator: String,
    #[prost(string, tag = "2")]
    pub port: String,
    #[prost(string, tag = "3")]
    pub channel_id: String,
    #[prost(uint64, tag = "4")]
    pub timeout_timestamp: u64,
    #[prost(string, tag = "5")]
    pub source_denom: String,
    #[prost(string, tag = "6")]
    pub target_denom: String,
}

/// Place a sell order on the order book of the counterparty chain.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSendSellOrder {
    #[prost(string, tag = "1")]
    pub creator: String,
    #[prost(string, tag = "2")]
    pub port: String,
    #[prost(string, tag = "3")]
    pub channel_id: String,
    #[prost(uint64, tag = "4")]
    pub timeout_timestamp: u64,
    #[prost(string, tag = "5")]
    pub amount_denom: String,
    #[prost(int32, tag = "6")]
    pub amount: i32,
    #[prost(string, tag = "7")]
    pub price_denom: String,
    #[prost(int32, tag = "8")]
    pub price: i32,
}

/// Place a buy order on the order book of the counterparty chain.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSendBuyOrder {
    #[prost(string, tag = "1")]
    pub creator: String,
    #[prost(string, tag = "2")]
    pub port: String,
    #[prost(string, tag = "3")]
    pub channel_id: String,
    #[prost(uint64, tag = "4")]
    pub timeout_timestamp: u64,
    #[prost(string, tag = "5")]
    pub amount_denom: String,
    #[prost(int32, tag = "6")]
    pub amount: i32,
    #[prost(string, tag = "7")]
    pub price_denom: String,
    #[prost(int32, tag = "8")]
    pub price: i32,
}

/// Cancel one of the creator's sell orders.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgCancelSellOrder {
    #[prost(string, tag = "1")]
    pub creator: String,
    #[prost(string, tag = "2")]
    pub port: String,
    #[prost(string, tag = "3")]
    pub channel: String,
    #[prost(string, tag = "4")]
    pub amount_denom: String,
    #[prost(string, tag = "5")]
    pub price_denom: String,
    #[prost(int32, tag = "6")]
    pub order_id: i32,
}

/// Cancel one of the creator's buy orders.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgCancelBuyOrder {
    #[prost(string, tag = "1")]
    pub creator: String,
    #[prost(string, tag = "2")]
    pub port: String,
    #[prost(string, tag = "3")]
    pub channel: String,
    #[prost(string, tag = "4")]
    pub amount_denom: String,
    #[prost(string, tag = "5")]
    pub price_denom: String,
    #[prost(int32, tag = "6")]
    pub order_id: i32,
}

impl DexMessage for MsgSendCreatePair {
    const TYPE_URL: &'static str = MSG_SEND_CREATE_PAIR;

    fn validate_basic(&self) -> Result<(), MessageError> {
        check_creator(&self.creator)?;
        check_non_empty("port", &self.port)?;
        check_non_empty("channelID", &self.channel_id)?;
        check_non_empty("sourceDenom", &self.source_denom)?;
        check_non_empty("targetDenom", &self.target_denom)
    }

    fn describe(&self) -> String {
        format!(
            "{} creating pair {}/{} over {}/{}",
            self.creator, self.source_denom, self.target_denom, self.port, self.channel_id
        )
    }

    fn creator(&self) -> &str {
        &self.creator
    }
}

impl DexMessage for MsgSendSellOrder {
    const TYPE_URL: &'static str = MSG_SEND_SELL_ORDER;

    fn validate_basic(&self) -> Result<(), MessageError> {
        check_creator(&self.creator)?;
        check_non_empty("port", &self.port)?;
        check_non_empty("channelID", &self.channel_id)?;
        check_non_empty("amountDenom", &self.amount_denom)?;
        check_non_empty("priceDenom", &self.price_denom)?;
        check_positive("amount", self.amount)?;
        check_positive("price", self.price)
    }

    fn describe(&self) -> String {
        format!(
            "{} selling {}{} at {}{} each over {}/{}",
            self.creator,
            self.amount,
            self.amount_denom,
            self.price,
            self.price_denom,
            self.port,
            self.channel_id
        )
    }

    fn creator(&self) -> &str {
        &self.creator
    }
}

impl DexMessage for MsgSendBuyOrder {
    const TYPE_URL: &'static str = MSG_SEND_BUY_ORDER;

    fn validate_basic(&self) -> Result<(), MessageError> {
        check_creator(&self.creator)?;
        check_non_empty("port", &self.port)?;
        check_non_empty("channelID", &self.channel_id)?;
        check_non_empty("amountDenom", &self.amount_denom)?;
        check_non_empty("priceDenom", &self.price_denom)?;
        check_positive("amount", self.amount)?;
        check_positive("price", self.price)
    }

    fn describe(&self) -> String {
        format!(
            "{} buying {}{} at {}{} each over {}/{}",
            self.creator,
            self.amount,
            self.amount_denom,
            self.price,
            self.price_denom,
            self.port,
            self.channel_id
        )
    }

    fn creator(&self) -> &str {
        &self.creator
    }
}

impl DexMessage for MsgCancelSellOrder {
    const TYPE_URL: &'static str = MSG_CANCEL_SELL_ORDER;

    fn validate_basic(&self) -> Result<(), MessageError> {
        check_creator(&self.creator)?;
        check_non_empty("port", &self.port)?;
        check_non_empty("channel", &self.channel)?;
        check_non_empty("amountDenom", &self.amount_denom)?;
        check_non_empty("priceDenom", &self.price_denom)?;
        if self.order_id < 0 {
            return Err(MessageError::NegativeOrderId(self.order_id));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "{} cancelling sell order {} on {}/{} over {}/{}",
            self.creator,
            self.order_id,
            self.amount_denom,
            self.price_denom,
            self.port,
            self.channel
        )
    }

    fn creator(&self) -> &str {
        &self.creator
    }
}

impl DexMessage for MsgCancelBuyOrder {
    const TYPE_URL: &'static str = MSG_CANCEL_BUY_ORDER;

    fn validate_basic(&self) -> Result<(), MessageError> {
        check_creator(&self.creator)?;
        check_non_empty("port", &self.port)?;
        check_non_empty("channel", &self.channel)?;
        check_non_empty("amountDenom", &self.amount_denom)?;
        check_non_empty("priceDenom", &self.price_denom)?;
        if self.order_id < 0 {
            return Err(MessageError::NegativeOrderId(self.order_id));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "{} cancelling buy order {} on {}/{} over {}/{}",
            self.creator,
            self.order_id,
            self.amount_denom,
            self.price_denom,
            self.port,
            self.channel
        )
    }

    fn creator(&self) -> &str {
        &self.creator
    }
}

impl From<MsgSendCreatePair> for TypedMessage {
    fn from(msg: MsgSendCreatePair) -> Self {
        TypedMessage::new(
            MsgSendCreatePair::TYPE_URL,
            msg.encode_to_vec(),
            msg.describe(),
        )
    }
}

impl From<MsgSendSellOrder> for TypedMessage {
    fn from(msg: MsgSendSellOrder) -> Self {
        TypedMessage::new(MsgSendSellOrder::TYPE_URL, msg.encode_to_vec(), msg.describe())
    }
}

impl From<MsgSendBuyOrder> for TypedMessage {
    fn from(msg: MsgSendBuyOrder) -> Self {
        TypedMessage::new(MsgSendBuyOrder::TYPE_URL, msg.encode_to_vec(), msg.describe())
    }
}

impl From<MsgCancelSellOrder> for TypedMessage {
    fn from(msg: MsgCancelSellOrder) -> Self {
        TypedMessage::new(
            MsgCancelSellOrder::TYPE_URL,
            msg.encode_to_vec(),
            msg.describe(),
        )
    }
}

impl From<MsgCancelBuyOrder> for TypedMessage {
    fn from(msg: MsgCancelBuyOrder) -> Self {
        TypedMessage::new(
            MsgCancelBuyOrder::TYPE_URL,
            msg.encode_to_vec(),
            msg.describe(),
        )
    }
}

/// Any dex transaction message, recovered from its type URL.
#[derive(Clone, Debug, PartialEq)]
pub enum DexMsg {
    SendCreatePair(MsgSendCreatePair),
    SendSellOrder(MsgSendSellOrder),
    SendBuyOrder(MsgSendBuyOrder),
    CancelSellOrder(MsgCancelSellOrder),
    CancelBuyOrder(MsgCancelBuyOrder),
}

impl DexMsg {
    pub fn type_url(&self) -> &'static str {
        match self {
            DexMsg::SendCreatePair(_) => MSG_SEND_CREATE_PAIR,
            DexMsg::SendSellOrder(_) => MSG_SEND_SELL_ORDER,
            DexMsg::SendBuyOrder(_) => MSG_SEND_BUY_ORDER,
            DexMsg::CancelSellOrder(_) => MSG_CANCEL_SELL_ORDER,
            DexMsg::CancelBuyOrder(_) => MSG_CANCEL_BUY_ORDER,
        }
    }

    pub fn validate_basic(&self) -> Result<(), MessageError> {
        match self {
            DexMsg::SendCreatePair(msg) => msg.validate_basic(),
            DexMsg::SendSellOrder(msg) => msg.validate_basic(),
            DexMsg::SendBuyOrder(msg) => msg.validate_basic(),
            DexMsg::CancelSellOrder(msg) => msg.validate_basic(),
            DexMsg::CancelBuyOrder(msg) => msg.validate_basic(),
        }
    }
}

fn decode_as<T: Message + Default>(any: &Any) -> Result<T, MessageError> {
    T::decode(any.value.as_slice()).map_err(|source| MessageError::Decode {
        type_url: any.type_url.clone(),
        source,
    })
}

impl TryFrom<&Any> for DexMsg {
    type Error = MessageError;

    fn try_from(any: &Any) -> Result<Self, Self::Error> {
        match any.type_url.as_str() {
            MSG_SEND_CREATE_PAIR => decode_as(any).map(DexMsg::SendCreatePair),
            MSG_SEND_SELL_ORDER => decode_as(any).map(DexMsg::SendSellOrder),
            MSG_SEND_BUY_ORDER => decode_as(any).map(DexMsg::SendBuyOrder),
            MSG_CANCEL_SELL_ORDER => decode_as(any).map(DexMsg::CancelSellOrder),
            MSG_CANCEL_BUY_ORDER => decode_as(any).map(DexMsg::CancelBuyOrder),
            other => Err(MessageError::UnknownTypeUrl(other.to_owned())),
        }
    }
}

impl From<DexMsg> for TypedMessage {
    fn from(msg: DexMsg) -> Self {
        match msg {
            DexMsg::SendCreatePair(msg) => msg.into(),
            DexMsg::SendSellOrder(msg) => msg.into(),
            DexMsg::SendBuyOrder(msg) => msg.into(),
            DexMsg::CancelSellOrder(msg) => msg.into(),
            DexMsg::CancelBuyOrder(msg) => msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATOR: &str = "osmo168gdk6r58jdwfv49kuesq2rs747jawnn4ryvyk";

    fn create_pair() -> MsgSendCreatePair {
        MsgSendCreatePair {
            creator: CREATOR.to_owned(),
            port: "dex".to_owned(),
            channel_id: "channel-0".to_owned(),
            timeout_timestamp: 10,
            source_denom: "marscoin".to_owned(),
            target_denom: "venuscoin".to_owned(),
        }
    }

    #[test]
    fn typed_message_routes_back() {
        let typed = TypedMessage::from(create_pair());
        let any = typed.into_inner();
        assert_eq!(any.type_url, "/interchangenel.dex.MsgSendCreatePair");
        assert_eq!(
            DexMsg::try_from(&any).unwrap(),
            DexMsg::SendCreatePair(create_pair())
        );
    }

    #[test]
    fn unknown_type_url() {
        let any = Any {
            type_url: "/interchangenel.dex.MsgBogus".to_owned(),
            value: vec![],
        };
        assert!(matches!(
            DexMsg::try_from(&any),
            Err(MessageError::UnknownTypeUrl(_))
        ));
    }

    #[test]
    fn partial_construction() {
        let msg = MsgCancelBuyOrder {
            creator: CREATOR.to_owned(),
            order_id: 3,
            ..Default::default()
        };
        assert_eq!(msg.port, "");
        assert_eq!(msg.channel, "");
        let decoded = DexMsg::try_from(&TypedMessage::from(msg.clone()).into_inner()).unwrap();
        assert_eq!(decoded, DexMsg::CancelBuyOrder(msg));
    }

    #[test]
    fn validation() {
        create_pair().validate_basic().unwrap();

        let bad_creator = MsgSendCreatePair {
            creator: "nobody".to_owned(),
            ..create_pair()
        };
        assert!(matches!(
            bad_creator.validate_basic(),
            Err(MessageError::InvalidCreator { .. })
        ));

        let no_channel = MsgSendCreatePair {
            channel_id: String::new(),
            ..create_pair()
        };
        assert!(matches!(
            no_channel.validate_basic(),
            Err(MessageError::EmptyField { field: "channelID" })
        ));

        let sell = MsgSendSellOrder {
            creator: CREATOR.to_owned(),
            port: "dex".to_owned(),
            channel_id: "channel-0".to_owned(),
            timeout_timestamp: 0,
            amount_denom: "marscoin".to_owned(),
            amount: 0,
            price_denom: "venuscoin".to_owned(),
            price: 5,
        };
        assert!(matches!(
            sell.validate_basic(),
            Err(MessageError::NotPositive {
                field: "amount",
                value: 0
            })
        ));

        let cancel = MsgCancelSellOrder {
            creator: CREATOR.to_owned(),
            port: "dex".to_owned(),
            channel: "channel-0".to_owned(),
            amount_denom: "marscoin".to_owned(),
            price_denom: "venuscoin".to_owned(),
            order_id: -1,
        };
        assert!(matches!(
            DexMsg::CancelSellOrder(cancel).validate_basic(),
            Err(MessageError::NegativeOrderId(-1))
        ));
    }

    #[test]
    fn registry_is_complete() {
        for url in REGISTERED_TYPE_URLS {
            let any = Any {
                type_url: url.to_owned(),
                value: vec![],
            };
            assert_eq!(DexMsg::try_from(&any).unwrap().type_url(), url);
        }
    }
}
