//! Property tests for growth functions, annuities and loan payments

use proptest::prelude::{prop_assert, proptest};

use interest_theory::annuity::rounding::same_cents;
use interest_theory::annuity::{payment_from_loan_amount, LoanPayment};
use interest_theory::growth::{initial_principal_solver, TieredBalance};
use interest_theory::{Amount, Annuity, GrowthFunction, GrowthRule, Rate, Timing};

fn close(actual: f64, expected: f64, rel: f64) -> bool {
    (actual - expected).abs() <= rel * expected.abs().max(1.0)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_compound_effective_rate_depends_only_on_length(
        rate_bp in 1u32..2500,
        start_tenths in 0u32..300,
        length_tenths in 1u32..200,
    ) {
        let i = rate_bp as f64 / 10_000.0;
        let t1 = start_tenths as f64 / 10.0;
        let t2 = t1 + length_tenths as f64 / 10.0;

        let amt = Amount::compound(1000.0, i).unwrap();
        let effective = amt.effective_rate_over(t1, t2, false).unwrap();
        let expected = (1.0 + i).powf(t2 - t1) - 1.0;
        prop_assert!(close(effective.rate, expected, 1e-9), "{} vs {}", effective.rate, expected);

        let annual = amt.effective_rate_over(t1, t2, true).unwrap();
        prop_assert!(close(annual.rate, i, 1e-9), "{} vs {}", annual.rate, i);
    }

    #[test]
    fn prop_closed_form_matches_summation(
        rate_bp in 1u32..2000,
        periods in 1u32..80,
        frequency in proptest::sample::select(vec![1.0, 2.0, 4.0, 12.0]),
        due in proptest::bool::ANY,
    ) {
        let period = 1.0 / frequency;
        let term = periods as f64 * period;
        let timing = if due { Timing::Due } else { Timing::Immediate };
        let rate = Rate::nominal(rate_bp as f64 / 10_000.0, frequency);

        let ann = Annuity::level(rate, 100.0, period, term, timing).unwrap();
        prop_assert!(ann.times().len() == periods as usize);

        let closed = ann.present_value().unwrap();
        let summed = ann.payments().net_present_value().unwrap();
        prop_assert!(close(closed, summed, 1e-9), "pv {} vs {}", closed, summed);

        let closed = ann.accumulated_value().unwrap();
        let summed = ann.payments().equivalent_value_at(term).unwrap();
        prop_assert!(close(closed, summed, 1e-9), "fv {} vs {}", closed, summed);
    }

    #[test]
    fn prop_rounded_loan_payments_repay_to_the_cent(
        loan in 100u32..100_000,
        years in 2u32..30,
        rate_bp in 50u32..1500,
        due in proptest::bool::ANY,
    ) {
        let loan = loan as f64;
        let i = rate_bp as f64 / 10_000.0;
        let term = years as f64;
        let (timing, first) = if due { (Timing::Due, 0) } else { (Timing::Immediate, 1) };

        let payment = payment_from_loan_amount(loan, 1.0, term, i, timing, true).unwrap();
        if let LoanPayment::Balanced(installments) = payment {
            prop_assert!(installments.last <= installments.amount);
        }

        let times: Vec<f64> = (first..first + years).map(|t| t as f64).collect();
        let schedule = Annuity::from_schedule(i, &payment.amounts(years as usize), &times).unwrap();
        let pv = schedule.present_value().unwrap();
        prop_assert!(same_cents(pv, loan).unwrap(), "{:?} repays {} not {}", payment, pv, loan);
    }

    #[test]
    fn prop_initial_principal_grows_back_to_target(
        rate_bp in 0u32..2000,
        fv in 1u32..1_000_000,
        t_tenths in 0u32..400,
    ) {
        let rate = Rate::effective(rate_bp as f64 / 10_000.0);
        let fv = fv as f64;
        let t = t_tenths as f64 / 10.0;

        let k = initial_principal_solver(&rate, fv, t).unwrap();
        let grown = rate.amount(k, t).unwrap();
        prop_assert!(close(grown, fv, 1e-12), "{} vs {}", grown, fv);
        prop_assert!(close(GrowthRule::accumulation(&rate, t).unwrap() * k, fv, 1e-12));
    }

    #[test]
    fn prop_tiered_balance_is_continuous(principal in 1u32..5000) {
        let k = principal as f64;
        let tb = TieredBalance::new(vec![0.0, 1000.0, 5000.0], vec![0.03, 0.05, 0.08]).unwrap();
        let jumps = tb.jump_times(k).unwrap();
        prop_assert!(!jumps.is_empty());

        for window in jumps.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        for &jump in &jumps {
            let before = tb.amount(k, jump - 1e-9).unwrap();
            let after = tb.amount(k, jump).unwrap();
            prop_assert!(close(before, after, 1e-8), "jump at {}: {} vs {}", jump, before, after);
        }
    }
}
