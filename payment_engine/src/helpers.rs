//! Token generation helpers.
//!
//! Payment slugs and transaction ids are opaque random tokens. The transaction id doubles as the
//! correlation key the gateway echoes back in its callback, so it must be unique across the system;
//! 24 alphanumeric characters gives far more entropy than needed for that.
use rand::{distributions::Alphanumeric, Rng};

const SLUG_LEN: usize = 11;
const TRANSACTION_ID_LEN: usize = 24;

fn random_token(len: usize) -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

/// A fresh slug for a payment record.
pub fn new_payment_slug() -> String {
    random_token(SLUG_LEN)
}

/// A fresh transaction id, used to correlate gateway callbacks with payments.
pub fn new_transaction_id() -> String {
    random_token(TRANSACTION_ID_LEN)
}

/// A fresh trace id for gateway-facing acknowledgements.
pub fn new_trace_id() -> String {
    random_token(32)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tokens_are_unique_enough() {
        let tokens: HashSet<String> = (0..1000).map(|_| new_transaction_id()).collect();
        assert_eq!(tokens.len(), 1000);
        assert!(tokens.iter().all(|t| t.len() == 24 && t.chars().all(|c| c.is_ascii_alphanumeric())));
    }

    #[test]
    fn slug_length() {
        assert_eq!(new_payment_slug().len(), 11);
    }
}
