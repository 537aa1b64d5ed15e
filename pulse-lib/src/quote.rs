use crate::error::QuoteError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_SYMBOL: &str = "BTC-USD";
pub const DEFAULT_QUOTE_ENDPOINT: &str = "https://api.binance.com/api/v3/ticker/price";

/// Shown in place of a price whenever the lookup fails, whatever the cause.
pub const QUOTE_HINT: &str = "Enter a valid ticker (e.g. AAPL, ETH-USD)";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait QuoteSource {
    async fn last_price(&self, symbol: &str) -> Result<f64, QuoteError>;
}

/// Quote lookup against a JSON price endpoint: `GET <endpoint>?symbol=<S>`.
/// No caching, no retries; one fresh request per render.
#[derive(Clone, Debug)]
pub struct HttpQuoteSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QuoteError::Service(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn last_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .map_err(|e| QuoteError::Service(e.to_string()))?
            .error_for_status()
            .map_err(|e| QuoteError::Service(e.to_string()))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| QuoteError::Service(e.to_string()))?;
        extract_last_price(&body, symbol)
    }
}

// Price services disagree on the field name and on whether the number comes
// quoted. Accept the common spellings, first hit wins.
fn extract_last_price(body: &Value, symbol: &str) -> Result<f64, QuoteError> {
    for key in ["price", "last_price", "lastPrice", "regularMarketPrice"] {
        let found = body.get(key).and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });
        if let Some(price) = found {
            return Ok(price);
        }
    }
    Err(QuoteError::NoPrice(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_a_numeric_price_field() {
        let body = json!({ "symbol": "BTC-USD", "price": 64250.5 });
        assert_eq!(extract_last_price(&body, "BTC-USD").unwrap(), 64250.5);
    }

    #[test]
    fn reads_a_quoted_price_field() {
        let body = json!({ "symbol": "BTCUSDT", "price": "64250.50" });
        assert_eq!(extract_last_price(&body, "BTCUSDT").unwrap(), 64250.5);
    }

    #[test]
    fn falls_through_the_known_spellings() {
        let body = json!({ "lastPrice": 12.25 });
        assert_eq!(extract_last_price(&body, "X").unwrap(), 12.25);
    }

    #[test]
    fn missing_price_is_an_error() {
        let body = json!({ "symbol": "NOPE" });
        assert!(matches!(
            extract_last_price(&body, "NOPE"),
            Err(QuoteError::NoPrice(_))
        ));
    }
}
