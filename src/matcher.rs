use itertools::{Itertools, iproduct};

use crate::{
    model::{Tariff, Transaction},
    prelude::*,
};

/// Supplier price applicable to a transaction.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct MatchedPair<'a> {
    pub tariff: &'a Tariff,
    pub transaction: &'a Transaction,
}

/// Join the transactions with their supplier prices, tariff-major and transaction-minor.
///
/// Known limitation: a transaction which matches multiple supplier prices is priced multiple
/// times, one row per supplier price. Such transactions are only reported.
#[instrument(skip_all)]
pub fn match_pairs<'a>(
    tariffs: &'a [Tariff],
    transactions: &'a [Transaction],
) -> Vec<MatchedPair<'a>> {
    let pairs = iproduct!(tariffs, transactions)
        .filter(|(tariff, transaction)| tariff.applies_to(transaction))
        .map(|(tariff, transaction)| MatchedPair { tariff, transaction })
        .collect_vec();
    report_duplicates(transactions, &pairs);
    info!(n_pairs = pairs.len(), "matched");
    pairs
}

fn report_duplicates(transactions: &[Transaction], pairs: &[MatchedPair]) {
    let counts = pairs.iter().map(|pair| std::ptr::from_ref(pair.transaction)).counts();
    for transaction in transactions {
        if let Some(&n_tariffs) = counts.get(&std::ptr::from_ref(transaction))
            && n_tariffs > 1
        {
            warn!(
                session_id = ?transaction.session_id,
                n_tariffs,
                "transaction matches multiple supplier prices"
            );
        }
    }
}
