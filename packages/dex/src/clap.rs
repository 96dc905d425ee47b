use std::time::Duration;

use anyhow::Result;

use crate::{QueryClient, QueryClientBuilder, DEFAULT_REST_URL};

/// Command line options for querying the dex module over REST
#[derive(clap::Parser, Clone, Debug)]
pub struct QueryOpt {
    /// REST endpoint of the node
    #[clap(long, env = "DEX_REST_URL", global = true, default_value = DEFAULT_REST_URL)]
    pub rest_url: String,
    /// Optional route prefix override, e.g. interchange-nel/dex
    #[clap(long, env = "DEX_ROUTE_PREFIX", global = true)]
    pub route_prefix: Option<String>,
    /// Optional request timeout override, in seconds
    #[clap(long, env = "DEX_QUERY_TIMEOUT", global = true)]
    pub query_timeout: Option<u64>,
    /// Referer header
    #[clap(long, global = true, env = "DEX_REFERER_HEADER")]
    referer_header: Option<String>,
}

impl QueryOpt {
    pub fn builder(&self) -> QueryClientBuilder {
        self.clone().into_builder()
    }

    pub fn into_builder(self) -> QueryClientBuilder {
        let QueryOpt {
            rest_url,
            route_prefix,
            query_timeout,
            referer_header,
        } = self;

        let mut builder = QueryClientBuilder::new(rest_url);
        builder.set_route_prefix(route_prefix);
        builder.set_request_timeout(query_timeout.map(Duration::from_secs));
        builder.set_referer_header(referer_header);

        builder
    }

    pub fn build(&self) -> Result<QueryClient> {
        self.builder().build().map_err(anyhow::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn flags_reach_builder() {
        let opt = QueryOpt::parse_from([
            "dex",
            "--rest-url",
            "http://node:1317",
            "--route-prefix",
            "cosmonaut/dex",
            "--query-timeout",
            "12",
        ]);
        let builder = opt.into_builder();
        assert_eq!(builder.rest_url(), "http://node:1317");
        assert_eq!(builder.route_prefix(), "cosmonaut/dex");
        assert_eq!(builder.request_timeout(), Duration::from_secs(12));
        assert_eq!(builder.referer_header(), None);
    }
}
