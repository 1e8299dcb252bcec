//! Property tests for signal invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism: same series, same oscillator and events
//! 2. Length: one oscillator point and one event per bar
//! 3. First bar: trigger iff directional, equal values give HOLD
//! 4. Continuation: repeated state never carries a trigger
//! 5. Transition: a new directional state carries that bar's close
//! 6. No look-ahead: a prefix of the series labels identically

use chrono::NaiveDate;
use macdlab_core::domain::{Bar, PriceSeries, SignalState};
use macdlab_core::signals::{candidate_state, MacdSignal};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0),
        1..80,
    )
}

fn make_series(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        })
        .collect();
    PriceSeries::new("PROP", bars).unwrap()
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(closes in arb_closes()) {
        let series = make_series(&closes);
        let signal = MacdSignal::default();
        let a = signal.evaluate(&series);
        let b = signal.evaluate(&series);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn one_point_and_one_event_per_bar(closes in arb_closes()) {
        let series = make_series(&closes);
        let signals = MacdSignal::default().evaluate(&series);
        prop_assert_eq!(signals.oscillator.len(), series.len());
        prop_assert_eq!(signals.events.len(), series.len());
        for ((point, event), bar) in signals.oscillator.iter().zip(&signals.events).zip(series.bars()) {
            prop_assert_eq!(point.date, bar.date);
            prop_assert_eq!(event.date, bar.date);
        }
    }

    #[test]
    fn first_bar_rule(closes in arb_closes()) {
        let series = make_series(&closes);
        let signals = MacdSignal::default().evaluate(&series);
        let p = signals.oscillator[0];
        let e = signals.events[0];
        prop_assert_eq!(e.state, candidate_state(p.macd, p.signal));
        if e.state.is_directional() {
            prop_assert_eq!(e.trigger_price, Some(closes[0]));
        } else {
            prop_assert_eq!(e.trigger_price, None);
        }
    }

    #[test]
    fn continuation_and_transition_rules(closes in arb_closes()) {
        let series = make_series(&closes);
        let signals = MacdSignal::default().evaluate(&series);
        for i in 1..signals.events.len() {
            let prev = signals.events[i - 1];
            let cur = signals.events[i];
            let p = signals.oscillator[i];
            prop_assert_eq!(cur.state, candidate_state(p.macd, p.signal));
            if cur.state == prev.state {
                prop_assert_eq!(cur.trigger_price, None);
            } else if cur.state == SignalState::Hold {
                prop_assert_eq!(cur.trigger_price, None);
            } else {
                prop_assert_eq!(cur.trigger_price, Some(closes[i]));
            }
        }
    }

    #[test]
    fn prefix_labels_identically(closes in arb_closes(), cut in 0.0..1.0_f64) {
        let n = ((closes.len() as f64 * cut) as usize).max(1);
        let full = MacdSignal::default().evaluate(&make_series(&closes));
        let prefix = MacdSignal::default().evaluate(&make_series(&closes[..n]));
        prop_assert_eq!(&full.oscillator[..n], &prefix.oscillator[..]);
        prop_assert_eq!(&full.events[..n], &prefix.events[..]);
    }
}
