//! Reconciliation engine tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use costrecon_shared::Month;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::ReconciliationEngine;
use super::ledger::{LEDGER_MONTHS, Ledger};
use super::types::CostStatus;
use crate::account::{Account, AwsCredentials, Contract};
use crate::billing::{BillingGateway, BillingPeriod, CostCache, CostSource, GatewayError};

/// Answers from a fixed table keyed by period start; unknown periods fail.
#[derive(Default)]
struct ScriptedSource {
    amounts: HashMap<NaiveDate, Decimal>,
    calls: AtomicUsize,
    periods: std::sync::Mutex<Vec<BillingPeriod>>,
}

impl ScriptedSource {
    fn with(amounts: &[(Month, Decimal)]) -> Self {
        Self {
            amounts: amounts.iter().map(|(m, a)| (m.first_day(), *a)).collect(),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CostSource for ScriptedSource {
    async fn cost_and_usage(
        &self,
        _credentials: &AwsCredentials,
        period: &BillingPeriod,
    ) -> Result<Decimal, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.periods.lock().unwrap().push(*period);
        self.amounts
            .get(&period.start)
            .copied()
            .ok_or_else(|| GatewayError::api(500, "InternalServerError"))
    }
}

fn ym(year: i32, month: u32) -> Month {
    Month::from_ym(year, month).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn account() -> Account {
    Account {
        id: "acc-1".to_string(),
        name: "Production".to_string(),
        onboard_date: None,
        credentials: AwsCredentials::new("AKID", "secret"),
        contracts: vec![],
    }
}

fn contract(start: NaiveDate, quoted: Decimal, historical: &[(Month, Decimal)]) -> Contract {
    Contract {
        contract_id: "c-1".to_string(),
        start_date: start,
        quoted_cost: quoted,
        historical_costs: historical.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}

fn engine(source: &Arc<ScriptedSource>) -> ReconciliationEngine {
    ReconciliationEngine::new(BillingGateway::new(
        source.clone(),
        Arc::new(CostCache::new()),
    ))
}

#[tokio::test]
async fn test_example_contract_with_legacy_live_and_future_months() {
    let source = Arc::new(ScriptedSource::with(&[
        (ym(2024, 2), dec!(300)),
        // March fails.
        (ym(2024, 4), dec!(600)),
    ]));
    let contract = contract(date(2024, 1, 1), dec!(500), &[(ym(2024, 1), dec!(450))]);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 4, 1))
        .await;

    assert_eq!(summary.monthly.len(), 12);
    let jan = &summary.monthly[0];
    assert_eq!(jan.month, ym(2024, 1));
    assert_eq!(jan.actual, dec!(450));
    assert_eq!(jan.variance, dec!(-50));
    assert_eq!(jan.status, CostStatus::BilledLegacy);

    assert_eq!(summary.monthly[1].actual, dec!(300));
    assert_eq!(summary.monthly[1].status, CostStatus::Billed);

    assert_eq!(summary.monthly[2].actual, dec!(300));
    assert_eq!(summary.monthly[2].status, CostStatus::Estimated);

    assert_eq!(summary.monthly[3].actual, dec!(600));
    assert_eq!(summary.monthly[3].status, CostStatus::Billed);

    for record in &summary.monthly[4..] {
        assert_eq!(record.actual, dec!(600));
        assert_eq!(record.status, CostStatus::Estimated);
    }
    assert_eq!(summary.monthly[11].month, ym(2024, 12));

    // Feb, Mar and Apr are live; nothing after April is queried.
    assert_eq!(source.calls(), 3);

    assert_eq!(summary.total_actual, dec!(6450));
    assert_eq!(summary.total_quoted, dec!(6000));
    assert_eq!(summary.total_variance, dec!(450));
}

#[tokio::test]
async fn test_full_historical_coverage_never_calls_gateway() {
    let source = Arc::new(ScriptedSource::default());
    let historical: Vec<(Month, Decimal)> =
        (0..12).map(|i| (ym(2023, 1).plus(i), dec!(100))).collect();
    let contract = contract(date(2023, 1, 1), dec!(90), &historical);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 6, 1))
        .await;

    assert_eq!(source.calls(), 0);
    assert!(
        summary
            .monthly
            .iter()
            .all(|r| r.status == CostStatus::BilledLegacy)
    );
    assert_eq!(summary.total_variance, dec!(120));
}

#[tokio::test]
async fn test_future_historical_month_is_still_legacy() {
    let source = Arc::new(ScriptedSource::default());
    let contract = contract(date(2024, 1, 1), dec!(10), &[(ym(2024, 10), dec!(25))]);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 1, 1))
        .await;

    let october = &summary.monthly[9];
    assert_eq!(october.month, ym(2024, 10));
    assert_eq!(october.status, CostStatus::BilledLegacy);
    assert_eq!(october.actual, dec!(25));

    // November estimates from the October override.
    assert_eq!(summary.monthly[10].actual, dec!(25));
    assert_eq!(summary.monthly[10].status, CostStatus::Estimated);
}

#[tokio::test]
async fn test_failed_months_carry_forward_last_actual() {
    let source = Arc::new(ScriptedSource::with(&[
        (ym(2023, 1), dec!(50)),
        (ym(2023, 2), dec!(100.0)),
        // March through May fail.
        (ym(2023, 6), dec!(70)),
    ]));
    let contract = contract(date(2023, 1, 1), dec!(80), &[]);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 6, 1))
        .await;

    for record in &summary.monthly[2..5] {
        assert_eq!(record.actual, dec!(100.0));
        assert_eq!(record.status, CostStatus::Estimated);
    }
    assert_eq!(summary.monthly[5].actual, dec!(70));
    assert_eq!(summary.monthly[5].status, CostStatus::Billed);
    // July onward fails and carries June.
    assert_eq!(summary.monthly[6].actual, dec!(70));
}

#[tokio::test]
async fn test_contract_older_than_a_year_has_no_future_months() {
    let amounts: Vec<(Month, Decimal)> =
        (0..12).map(|i| (ym(2022, 3).plus(i), dec!(10))).collect();
    let source = Arc::new(ScriptedSource::with(&amounts));
    let contract = contract(date(2022, 3, 1), dec!(10), &[]);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 6, 1))
        .await;

    assert_eq!(source.calls(), 12);
    assert!(summary.monthly.iter().all(|r| r.status == CostStatus::Billed));
    assert_eq!(summary.total_variance, dec!(0));
}

#[tokio::test]
async fn test_mid_month_start_is_normalized() {
    let source = Arc::new(ScriptedSource::with(&[(ym(2024, 1), dec!(5))]));
    let contract = contract(date(2024, 1, 15), dec!(5), &[]);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 1, 20))
        .await;

    assert_eq!(summary.start_date, date(2024, 1, 15));
    assert_eq!(summary.monthly[0].month, ym(2024, 1));
    assert_eq!(summary.monthly[0].status, CostStatus::Billed);

    let periods = source.periods.lock().unwrap();
    assert_eq!(
        periods.as_slice(),
        &[BillingPeriod::new(date(2024, 1, 1), date(2024, 2, 1))]
    );
}

#[tokio::test]
async fn test_no_data_estimates_zero() {
    let source = Arc::new(ScriptedSource::default());
    let contract = contract(date(2024, 1, 1), dec!(500), &[]);

    let summary = engine(&source)
        .reconcile_as_of(&account(), &contract, date(2024, 3, 1))
        .await;

    assert!(summary.monthly.iter().all(|r| r.actual == dec!(0)));
    assert!(
        summary
            .monthly
            .iter()
            .all(|r| r.status == CostStatus::Estimated)
    );
    assert_eq!(summary.total_variance, dec!(-6000));
}

#[tokio::test]
async fn test_second_reconciliation_is_served_from_cache() {
    let source = Arc::new(ScriptedSource::with(&[
        (ym(2024, 1), dec!(1)),
        (ym(2024, 2), dec!(2)),
    ]));
    let engine = engine(&source);
    let contract = contract(date(2024, 1, 1), dec!(1), &[]);

    let first = engine
        .reconcile_as_of(&account(), &contract, date(2024, 2, 10))
        .await;
    let second = engine
        .reconcile_as_of(&account(), &contract, date(2024, 2, 10))
        .await;

    assert_eq!(first, second);
    assert_eq!(source.calls(), 2);
    assert_eq!(engine.gateway().cache().len(), 2);
}

#[tokio::test]
async fn test_reconcile_uses_wall_clock() {
    let source = Arc::new(ScriptedSource::default());
    let far_future = contract(date(2999, 1, 1), dec!(1), &[]);

    let summary = engine(&source).reconcile(&account(), &far_future).await;

    assert_eq!(source.calls(), 0);
    assert_eq!(summary.monthly.len(), 12);
}

proptest! {
    /// total_variance equals total_actual - total_quoted within rounding.
    #[test]
    fn test_total_variance_consistent(
        quoted_cents in 0i64..10_000_000,
        actual_millis in proptest::collection::vec(0i64..100_000_000, 12),
    ) {
        let quoted = Decimal::new(quoted_cents, 2);
        let mut ledger = Ledger::new(quoted);
        for (i, millis) in actual_millis.iter().enumerate() {
            ledger.record(ym(2024, 1).plus(i as u32), Decimal::new(*millis, 3), CostStatus::Billed);
        }
        let summary = ledger.finish("c-1", date(2024, 1, 1));

        prop_assert_eq!(summary.monthly.len(), LEDGER_MONTHS as usize);
        let diff = (summary.total_variance - (summary.total_actual - summary.total_quoted)).abs();
        prop_assert!(diff <= dec!(0.01));
        for record in &summary.monthly {
            prop_assert!(record.variance.scale() <= 2);
            prop_assert!(record.actual.scale() <= 2);
        }
    }

    /// With no overrides and every month in the past, a month is BILLED
    /// exactly when its lookup succeeded.
    #[test]
    fn test_status_tracks_gateway_outcome(outcomes in proptest::collection::vec(any::<bool>(), 12)) {
        let amounts: Vec<(Month, Decimal)> = outcomes
            .iter()
            .enumerate()
            .filter(|(_, ok)| **ok)
            .map(|(i, _)| (ym(2020, 1).plus(i as u32), Decimal::from(i as i64 + 1)))
            .collect();
        let source = Arc::new(ScriptedSource::with(&amounts));
        let contract = contract(date(2020, 1, 1), dec!(3), &[]);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let summary = runtime.block_on(
            engine(&source).reconcile_as_of(&account(), &contract, date(2024, 1, 1)),
        );

        for (record, ok) in summary.monthly.iter().zip(&outcomes) {
            let expected = if *ok { CostStatus::Billed } else { CostStatus::Estimated };
            prop_assert_eq!(record.status, expected);
        }
    }
}
