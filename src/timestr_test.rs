// Unit tests for duration expression parsing

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_plain_numbers_are_seconds() {
    assert!(approx(timestr_to_secs("1.5").unwrap(), 1.5));
    assert!(approx(timestr_to_secs("10").unwrap(), 10.0));
    assert!(approx(timestr_to_secs(" 0 ").unwrap(), 0.0));
}

#[test]
fn test_unit_expressions() {
    assert!(approx(timestr_to_secs("2 seconds").unwrap(), 2.0));
    assert!(approx(timestr_to_secs("1 min 30 s").unwrap(), 90.0));
    assert!(approx(timestr_to_secs("1h2m").unwrap(), 3_720.0));
    assert!(approx(timestr_to_secs("1 day").unwrap(), 86_400.0));
    assert!(approx(timestr_to_secs("250ms").unwrap(), 0.25));
    assert!(approx(timestr_to_secs("1.5 Minutes").unwrap(), 90.0));
}

#[test]
fn test_timer_format() {
    assert!(approx(timestr_to_secs("01:30").unwrap(), 90.0));
    assert!(approx(timestr_to_secs("1:02:03.5").unwrap(), 3_723.5));
}

#[test]
fn test_rejects_invalid_expressions() {
    for bad in ["", "   ", "-1", "-2 s", "abc", "5 fortnights", "1s2", "1:2:3:4", "inf", "nan"] {
        let err = timestr_to_secs(bad).unwrap_err();
        assert!(
            matches!(err, WebassertError::InvalidTimeout(_)),
            "expected InvalidTimeout for {bad:?}"
        );
    }
}

#[test]
fn test_timer_fields_must_be_unsigned() {
    for bad in ["01:-30", "1:+30", "-1:30", "1:30e2"] {
        assert!(
            matches!(timestr_to_secs(bad), Err(WebassertError::InvalidTimeout(_))),
            "expected InvalidTimeout for {bad:?}"
        );
    }
}

#[test]
fn test_duration_out_of_range_is_invalid() {
    for huge in ["1e300", "999999999999999999999 days"] {
        let err = timestr_to_duration(huge).unwrap_err();
        assert!(
            matches!(err, WebassertError::InvalidTimeout(_)),
            "expected InvalidTimeout for {huge:?}"
        );
    }
}

#[test]
fn test_duration_conversion() {
    assert_eq!(
        timestr_to_duration("1.5").unwrap(),
        Duration::from_millis(1500)
    );
    assert_eq!(
        timestr_to_duration("2 min").unwrap(),
        Duration::from_secs(120)
    );
}
