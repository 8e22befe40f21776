//! Stop-loss trigger rule.

use crate::domain::shared::Price;

/// Long-position breach rule: trigger when the last traded price is at or
/// below the stop threshold.
///
/// Short positions are not monitored; their stop semantics are unspecified
/// upstream and are rejected at request validation instead of guessed here.
#[must_use]
pub fn breaches_stop(ltp: Price, stop_loss_price: Price) -> bool {
    ltp <= stop_loss_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn breach_below_threshold() {
        assert!(breaches_stop(Price::new(dec!(2499.5)), Price::new(dec!(2500))));
    }

    #[test]
    fn breach_exactly_at_threshold() {
        assert!(breaches_stop(Price::new(dec!(2500)), Price::new(dec!(2500))));
    }

    #[test]
    fn no_breach_above_threshold() {
        assert!(!breaches_stop(Price::new(dec!(2501)), Price::new(dec!(2500))));
        assert!(!breaches_stop(
            Price::new(dec!(2500.05)),
            Price::new(dec!(2500))
        ));
    }
}
