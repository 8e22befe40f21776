//! Instrument Resolver Port (Driven Port)
//!
//! Symbol-to-token lookup against a static table, read-only during a run.

use crate::domain::shared::{InstrumentToken, Symbol};

/// Port for resolving exchange symbols to broker instrument tokens.
pub trait InstrumentResolver: Send + Sync {
    /// Look up the token for a symbol. `None` means the symbol is unknown.
    fn resolve(&self, symbol: &Symbol) -> Option<InstrumentToken>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapResolver(HashMap<String, InstrumentToken>);

    impl InstrumentResolver for MapResolver {
        fn resolve(&self, symbol: &Symbol) -> Option<InstrumentToken> {
            self.0.get(symbol.as_str()).copied()
        }
    }

    #[test]
    fn resolver_hit_and_miss() {
        let mut map = HashMap::new();
        map.insert("RELIANCE".to_string(), InstrumentToken::new(738_561));
        let resolver = MapResolver(map);

        assert_eq!(
            resolver.resolve(&Symbol::new("reliance")),
            Some(InstrumentToken::new(738_561))
        );
        assert_eq!(resolver.resolve(&Symbol::new("UNKNOWN")), None);
    }
}
