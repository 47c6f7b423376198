//! Splitting of a revenue/cost amount among the partners of an asset.
//!
//! Amounts are integer minor units, so every split sums to the original amount
//! exactly. Rounding residue (at most a few cents) is absorbed by the
//! recorder's row when there is one, otherwise by the first row.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine,
    money::MoneyCents,
    share::{FULL_SHARE, SHARE_EPSILON, exceeds_cap, leaves_remainder},
};

/// One row of a split: who gets how much of the transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub user_id: String,
    pub amount_minor: i64,
    pub percentage: f64,
}

impl Allocation {
    fn new(user_id: &str, amount_minor: i64, percentage: f64) -> Self {
        Self {
            user_id: user_id.to_string(),
            amount_minor,
            percentage,
        }
    }
}

fn portion(amount_minor: i64, percentage: f64) -> i64 {
    // The nudge keeps exact products (1000 * 40%) from landing just below the
    // integer after the division.
    (amount_minor as f64 * percentage / FULL_SHARE + SHARE_EPSILON).floor() as i64
}

fn absorb_residual(
    rows: &mut [Allocation],
    amount_minor: i64,
    recorder_id: &str,
) -> ResultEngine<()> {
    let allocated = MoneyCents::total(rows.iter().map(|row| row.amount_minor))?;
    let residual = MoneyCents::new(amount_minor).try_sub(allocated)?;
    if residual == MoneyCents::ZERO {
        return Ok(());
    }
    let target = rows
        .iter()
        .position(|row| row.user_id == recorder_id)
        .unwrap_or(0);
    if let Some(row) = rows.get_mut(target) {
        row.amount_minor = MoneyCents::new(row.amount_minor).try_add(residual)?.minor();
    }
    Ok(())
}

/// Split `amount_minor` proportionally to the given active shares.
///
/// With no shares the recorder gets everything. When the shares leave part of
/// the asset unallocated, the remainder is credited to the recorder (merged
/// into their row if they are a partner themselves).
pub(crate) fn split_by_shares<'a>(
    amount_minor: i64,
    shares: impl IntoIterator<Item = (&'a str, f64)>,
    recorder_id: &str,
) -> ResultEngine<Vec<Allocation>> {
    let mut rows = Vec::new();
    let mut total = 0.0;
    for (user_id, percentage) in shares {
        total += percentage;
        rows.push(Allocation::new(
            user_id,
            portion(amount_minor, percentage),
            percentage,
        ));
    }

    if rows.is_empty() {
        return Ok(vec![Allocation::new(recorder_id, amount_minor, FULL_SHARE)]);
    }

    if exceeds_cap(total) {
        return Err(EngineError::Consistency(format!(
            "active shares sum to {total}%"
        )));
    }

    if leaves_remainder(total) {
        let remainder = FULL_SHARE - total;
        match rows.iter_mut().find(|row| row.user_id == recorder_id) {
            Some(row) => row.percentage += remainder,
            None => rows.push(Allocation::new(recorder_id, 0, remainder)),
        }
    }

    absorb_residual(&mut rows, amount_minor, recorder_id)?;
    Ok(rows)
}

/// Split `amount_minor` equally among an explicit list of users.
pub(crate) fn split_equally(
    amount_minor: i64,
    user_ids: &[String],
    recorder_id: &str,
) -> ResultEngine<Vec<Allocation>> {
    if user_ids.is_empty() {
        return Err(EngineError::Validation(
            "invalid attribution users: list is empty".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = user_ids.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(EngineError::Validation(format!(
            "invalid attribution users: '{dup}' listed twice"
        )));
    }

    let count = user_ids.len() as i64;
    let base = amount_minor / count;
    let percentage = FULL_SHARE / count as f64;
    let mut rows: Vec<Allocation> = user_ids
        .iter()
        .map(|user_id| Allocation::new(user_id, base, percentage))
        .collect();

    absorb_residual(&mut rows, amount_minor, recorder_id)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(rows: &[Allocation]) -> Vec<(&str, i64)> {
        rows.iter()
            .map(|row| (row.user_id.as_str(), row.amount_minor))
            .collect()
    }

    fn percent_total(rows: &[Allocation]) -> f64 {
        rows.iter().map(|row| row.percentage).sum()
    }

    #[test]
    fn no_partners_goes_to_recorder() {
        let rows = split_by_shares(1000, Vec::<(&str, f64)>::new(), "alice").unwrap();
        assert_eq!(rows, vec![Allocation::new("alice", 1000, 100.0)]);
    }

    #[test]
    fn remainder_is_credited_to_recorder() {
        let rows = split_by_shares(1000, [("bob", 40.0)], "alice").unwrap();
        assert_eq!(amounts(&rows), vec![("bob", 400), ("alice", 600)]);
        assert!((rows[1].percentage - 60.0).abs() < SHARE_EPSILON);
    }

    #[test]
    fn recorder_partner_row_absorbs_remainder() {
        let rows = split_by_shares(1000, [("bob", 50.0), ("alice", 20.0)], "alice").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(amounts(&rows), vec![("bob", 500), ("alice", 500)]);
        assert!((rows[1].percentage - 50.0).abs() < SHARE_EPSILON);
    }

    #[test]
    fn full_allocation_adds_no_recorder_row() {
        let rows = split_by_shares(1000, [("bob", 60.0), ("carol", 40.0)], "alice").unwrap();
        assert_eq!(amounts(&rows), vec![("bob", 600), ("carol", 400)]);
    }

    #[test]
    fn thirds_sum_exactly() {
        let shares = [("bob", 100.0 / 3.0), ("carol", 100.0 / 3.0), ("dave", 100.0 / 3.0)];
        let rows = split_by_shares(1000, shares, "alice").unwrap();
        let total: i64 = rows.iter().map(|row| row.amount_minor).sum();
        assert_eq!(total, 1000);
        assert_eq!(rows.len(), 3);
        assert!((percent_total(&rows) - 100.0).abs() < SHARE_EPSILON);
        // Nobody listed is the recorder, so the first row takes the stray cent.
        assert_eq!(rows[0].amount_minor, 334);
    }

    #[test]
    fn over_cap_is_inconsistent() {
        let err = split_by_shares(1000, [("bob", 70.0), ("carol", 40.0)], "alice").unwrap_err();
        assert!(matches!(err, EngineError::Consistency(_)));
    }

    #[test]
    fn largest_recordable_amount_splits_exactly() {
        let amount = crate::MAX_AMOUNT_MINOR;
        let rows = split_by_shares(amount, [("bob", 50.0), ("carol", 50.0)], "alice").unwrap();
        assert_eq!(amounts(&rows), vec![("bob", amount / 2), ("carol", amount / 2)]);
    }

    #[test]
    fn overflowing_split_is_an_error() {
        let err = split_by_shares(i64::MAX, [("bob", 50.0), ("carol", 50.0)], "alice").unwrap_err();
        assert_eq!(err, EngineError::Validation("amount too large".to_string()));
    }

    #[test]
    fn equal_split_between_two() {
        let users = vec!["bob".to_string(), "carol".to_string()];
        let rows = split_equally(500, &users, "alice").unwrap();
        assert_eq!(amounts(&rows), vec![("bob", 250), ("carol", 250)]);
        assert!(rows.iter().all(|row| (row.percentage - 50.0).abs() < SHARE_EPSILON));
    }

    #[test]
    fn equal_split_residual_prefers_recorder() {
        let users = vec!["bob".to_string(), "alice".to_string(), "carol".to_string()];
        let rows = split_equally(100, &users, "alice").unwrap();
        assert_eq!(amounts(&rows), vec![("bob", 33), ("alice", 34), ("carol", 33)]);
    }

    #[test]
    fn equal_split_rejects_empty_and_duplicates() {
        assert!(matches!(
            split_equally(100, &[], "alice"),
            Err(EngineError::Validation(_))
        ));
        let users = vec!["bob".to_string(), "bob".to_string()];
        assert!(matches!(
            split_equally(100, &users, "alice"),
            Err(EngineError::Validation(_))
        ));
    }
}
