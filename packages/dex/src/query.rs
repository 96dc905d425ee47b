//! REST queries against the dex module.

use base64::Engine;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::{
    error::QueryError,
    packet::{is_zero, null_as_default},
    QueryClientBuilder,
};

/// Module parameters. The dex module currently defines none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {}

/// A single resting order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: i32,
}

/// Orders of one side of a pair, with the next order ID to allocate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub id_count: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders: Vec<Order>,
}

/// Sell orders for a pair, stored on the chain where the amount denom originates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellOrderBook {
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_denom: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_denom: String,
    #[serde(default)]
    pub book: Option<OrderBook>,
}

/// Buy orders for a pair, stored on the chain where the price denom originates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyOrderBook {
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_denom: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_denom: String,
    #[serde(default)]
    pub book: Option<OrderBook>,
}

/// Origin of a voucher denom minted by the module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenomTrace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: String,
}

/// Pagination options for list queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub key: Option<Vec<u8>>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub count_total: bool,
    pub reverse: bool,
}

impl PageRequest {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![];
        if let Some(key) = &self.key {
            params.push((
                "pagination.key",
                base64::engine::general_purpose::STANDARD.encode(key),
            ));
        }
        if let Some(offset) = self.offset {
            params.push(("pagination.offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("pagination.limit", limit.to_string()));
        }
        if self.count_total {
            params.push(("pagination.count_total", "true".to_owned()));
        }
        if self.reverse {
            params.push(("pagination.reverse", "true".to_owned()));
        }
        params
    }
}

/// Pagination information returned with list queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PageResponse {
    /// Key to pass in [PageRequest::key] to fetch the next page
    #[serde(default, deserialize_with = "base64_opt")]
    pub next_key: Option<Vec<u8>>,
    /// Only filled in when [PageRequest::count_total] is set
    #[serde(default, deserialize_with = "u64_from_string")]
    pub total: u64,
}

/// One page of a list query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<PageResponse>,
}

fn base64_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => base64::engine::general_purpose::STANDARD
            .decode(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The gateway encodes 64-bit integers as strings.
fn u64_from_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(0),
        Some(StringOrNumber::Number(x)) => Ok(x),
        Some(StringOrNumber::String(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
struct ParamsResponse {
    #[serde(default)]
    params: Params,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetSellOrderBookResponse {
    sell_order_book: SellOrderBook,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllSellOrderBookResponse {
    #[serde(default)]
    sell_order_book: Vec<SellOrderBook>,
    pagination: Option<PageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetBuyOrderBookResponse {
    buy_order_book: BuyOrderBook,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllBuyOrderBookResponse {
    #[serde(default)]
    buy_order_book: Vec<BuyOrderBook>,
    pagination: Option<PageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetDenomTraceResponse {
    denom_trace: DenomTrace,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllDenomTraceResponse {
    #[serde(default)]
    denom_trace: Vec<DenomTrace>,
    pagination: Option<PageResponse>,
}

/// Client for the dex module's REST query routes.
#[derive(Clone, Debug)]
pub struct QueryClient {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl QueryClient {
    pub(crate) fn new(client: reqwest::Client, base: reqwest::Url) -> Self {
        QueryClient { client, base }
    }

    /// Connect to the given REST endpoint with default settings.
    pub fn connect(rest_url: impl Into<String>) -> Result<Self, QueryError> {
        QueryClientBuilder::new(rest_url).build()
    }

    fn route(&self, segments: &[&str]) -> reqwest::Url {
        let mut url = self.base.clone();
        // The base URL was checked to be a valid base when building.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: reqwest::Url,
        params: &[(&str, String)],
    ) -> Result<T, QueryError> {
        tracing::debug!("Dex query: {url} {params:?}");
        let url_string = url.to_string();
        let http = |source| QueryError::Http {
            url: url_string.clone(),
            source,
        };
        let res = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(http)?;
        let status = res.status();
        let body = res.text().await.map_err(http)?;
        if !status.is_success() {
            return Err(QueryError::Status {
                url: url_string,
                status,
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| QueryError::Json {
            url: url_string,
            body,
            source,
        })
    }

    pub async fn params(&self) -> Result<Params, QueryError> {
        let res: ParamsResponse = self.get(self.route(&["params"]), &[]).await?;
        Ok(res.params)
    }

    pub async fn sell_order_book(&self, index: &str) -> Result<SellOrderBook, QueryError> {
        let res: GetSellOrderBookResponse =
            self.get(self.route(&["sellOrderBook", index]), &[]).await?;
        Ok(res.sell_order_book)
    }

    pub async fn all_sell_order_books(
        &self,
        page: &PageRequest,
    ) -> Result<Page<SellOrderBook>, QueryError> {
        let res: AllSellOrderBookResponse = self
            .get(self.route(&["sellOrderBook"]), &page.query_params())
            .await?;
        Ok(Page {
            items: res.sell_order_book,
            pagination: res.pagination,
        })
    }

    pub async fn buy_order_book(&self, index: &str) -> Result<BuyOrderBook, QueryError> {
        let res: GetBuyOrderBookResponse =
            self.get(self.route(&["buyOrderBook", index]), &[]).await?;
        Ok(res.buy_order_book)
    }

    pub async fn all_buy_order_books(
        &self,
        page: &PageRequest,
    ) -> Result<Page<BuyOrderBook>, QueryError> {
        let res: AllBuyOrderBookResponse = self
            .get(self.route(&["buyOrderBook"]), &page.query_params())
            .await?;
        Ok(Page {
            items: res.buy_order_book,
            pagination: res.pagination,
        })
    }

    pub async fn denom_trace(&self, index: &str) -> Result<DenomTrace, QueryError> {
        let res: GetDenomTraceResponse =
            self.get(self.route(&["denomTrace", index]), &[]).await?;
        Ok(res.denom_trace)
    }

    pub async fn all_denom_traces(
        &self,
        page: &PageRequest,
    ) -> Result<Page<DenomTrace>, QueryError> {
        let res: AllDenomTraceResponse = self
            .get(self.route(&["denomTrace"]), &page.query_params())
            .await?;
        Ok(Page {
            items: res.denom_trace,
            pagination: res.pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> QueryClient {
        QueryClient::connect("http://localhost:1317").unwrap()
    }

    #[test]
    fn routes_escape_index() {
        let url = client().route(&["sellOrderBook", "dex-channel-0-ibc/ABC-stake"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:1317/interchange-nel/dex/sellOrderBook/dex-channel-0-ibc%2FABC-stake"
        );
    }

    #[test]
    fn pagination_params() {
        assert!(PageRequest::default().query_params().is_empty());
        let page = PageRequest {
            key: Some(vec![1, 2, 3]),
            limit: Some(10),
            count_total: true,
            ..Default::default()
        };
        assert_eq!(
            page.query_params(),
            vec![
                ("pagination.key", "AQID".to_owned()),
                ("pagination.limit", "10".to_owned()),
                ("pagination.count_total", "true".to_owned()),
            ]
        );
    }

    #[test]
    fn parse_order_book_list() {
        let res: AllSellOrderBookResponse = serde_json::from_value(json!({
            "sellOrderBook": [{
                "index": "dex-channel-0-marscoin-venuscoin",
                "amountDenom": "marscoin",
                "priceDenom": "venuscoin",
                "book": {
                    "idCount": 2,
                    "orders": [
                        {"id": 0, "creator": "cosmos1abc", "amount": 10, "price": 15},
                        {"id": 1, "creator": "cosmos1def", "amount": 5, "price": 12}
                    ]
                }
            }],
            "pagination": {"next_key": null, "total": "1"}
        }))
        .unwrap();
        assert_eq!(res.sell_order_book.len(), 1);
        let book = res.sell_order_book[0].book.as_ref().unwrap();
        assert_eq!(book.id_count, 2);
        assert_eq!(book.orders[1].price, 12);
        assert_eq!(
            res.pagination,
            Some(PageResponse {
                next_key: None,
                total: 1
            })
        );
    }

    #[test]
    fn parse_denom_trace() {
        let res: GetDenomTraceResponse = serde_json::from_value(json!({
            "denomTrace": {
                "index": "ibc/ABCDEF012345",
                "port": "dex",
                "channel": "channel-0",
                "origin": "marscoin"
            }
        }))
        .unwrap();
        assert_eq!(res.denom_trace.origin, "marscoin");

        let res: AllDenomTraceResponse =
            serde_json::from_value(json!({"denomTrace": [], "pagination": {"next_key": "AQID", "total": "0"}}))
                .unwrap();
        assert_eq!(res.pagination.unwrap().next_key, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn unreachable_node() {
        let mut builder = QueryClientBuilder::new("http://127.0.0.1:9");
        builder.set_request_timeout(Some(std::time::Duration::from_secs(1)));
        let client = builder.build().unwrap();
        assert!(matches!(
            client.params().await,
            Err(QueryError::Http { .. })
        ));
    }
}
