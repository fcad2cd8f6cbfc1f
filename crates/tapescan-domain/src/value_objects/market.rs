use serde::{Deserialize, Serialize};

/// Market classifier for a ticker, used to pick a liquidity floor.
/// Anything outside the known exchanges maps to `Other` (no floor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Us,
    Asx,
    Other,
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Us => write!(f, "us"),
            Market::Asx => write!(f, "asx"),
            Market::Other => write!(f, "other"),
        }
    }
}

/// One ticker to screen in the breakout scan.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenRequest {
    pub symbol: String,
    pub market: Market,
}

#[cfg(test)]
mod tests {
    use super::{Market, ScreenRequest};

    #[test]
    fn market_parses_lowercase() {
        let request: ScreenRequest =
            serde_json::from_str(r#"{"symbol":"BHP.AX","market":"asx"}"#).expect("parse");
        assert_eq!(request.market, Market::Asx);
    }

    #[test]
    fn unknown_market_is_rejected_by_serde() {
        let err = serde_json::from_str::<ScreenRequest>(r#"{"symbol":"X","market":"lse"}"#)
            .expect_err("unknown market");
        assert!(err.to_string().contains("unknown variant"));
    }
}
