use crate::value_objects::market::Market;
use serde::{Deserialize, Serialize};

/// Minimum latest daily volume per market, applied before any indicator
/// work. Passed into the breakout screen so runs can override it; markets
/// without a rule have no floor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LiquidityRules {
    pub us: f64,
    pub asx: f64,
}

impl Default for LiquidityRules {
    fn default() -> Self {
        Self {
            us: 1_000_000.0,
            asx: 300_000.0,
        }
    }
}

impl LiquidityRules {
    pub fn floor(&self, market: Market) -> f64 {
        match market {
            Market::Us => self.us,
            Market::Asx => self.asx,
            Market::Other => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LiquidityRules;
    use crate::value_objects::market::Market;

    #[test]
    fn default_floors_match_the_rulebook() {
        let rules = LiquidityRules::default();
        assert_eq!(rules.floor(Market::Us), 1_000_000.0);
        assert_eq!(rules.floor(Market::Asx), 300_000.0);
    }

    #[test]
    fn unrecognized_markets_have_no_floor() {
        let rules = LiquidityRules::default();
        assert_eq!(rules.floor(Market::Other), 0.0);
    }
}
