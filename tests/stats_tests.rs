use vlbisummary::chart::PieChart;
use vlbisummary::utils::fmt_value;
use vlbisummary::utils::stats::{bounds, median, nansum, percentages};

#[test]
fn test_median_odd_even_and_nan() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median(&[f64::NAN, 5.0, 1.0]), Some(3.0));
    assert_eq!(median(&[]), None);
    assert_eq!(median(&[f64::NAN]), None);
}

#[test]
fn test_nansum_skips_missing() {
    let total = nansum([Some(1.0), None, Some(f64::NAN), Some(2.5)]);
    assert_eq!(total, 3.5);
}

#[test]
fn test_percentages_hand_computed() {
    let p = percentages(&[1.0, 1.0, 2.0]);
    assert_eq!(p, vec![25.0, 25.0, 50.0]);
    assert_eq!(percentages(&[0.0, 0.0]), vec![0.0, 0.0]);
}

#[test]
fn test_pie_percentages_sum_to_100() {
    let pie = PieChart::new(
        "Session Distribution",
        vec!["IVS-R1".into(), "IVS-R4".into(), "AUSTRAL".into()],
        vec![7.0, 11.0, 13.0],
    );
    let sum: f64 = pie.percentages().iter().sum();
    assert!((sum - 100.0).abs() < 1e-9);

    let legend = pie.legend_entries();
    assert_eq!(legend[0], "IVS-R1: 22.58%");
}

#[test]
fn test_bounds() {
    assert_eq!(bounds(&[2.0, -1.0, 5.0]), Some((-1.0, 5.0)));
    assert_eq!(bounds(&[]), None);
}

#[test]
fn test_fmt_value_matches_report_style() {
    assert_eq!(fmt_value(24.0), "24.0");
    assert_eq!(fmt_value(23.5), "23.5");
    assert_eq!(fmt_value(0.8125), "0.8125");
}
