#[cfg(test)]
mod tests {
    use promql_ast::duration::{Duration, format_duration, parse_duration};
    use promql_ast::error::AstError;
    use rstest::rstest;

    const DAY: i64 = 24 * 60 * 60 * 1000;

    // ========================================================================
    // Parsing
    // ========================================================================

    #[rstest]
    #[case("0", 0)]
    #[case("0s", 0)]
    #[case("500ms", 500)]
    #[case("30s", 30_000)]
    #[case("5m", 300_000)]
    #[case("1h30m", 5_400_000)]
    #[case("1d12h", DAY + 12 * 3_600_000)]
    #[case("5d", 5 * DAY)]
    #[case("2w", 14 * DAY)]
    #[case("1y", 365 * DAY)]
    #[case("1m30s500ms", 90_500)]
    #[case("1y2w3d4h5m6s7ms", 365 * DAY + 17 * DAY + 4 * 3_600_000 + 5 * 60_000 + 6_000 + 7)]
    fn test_parse_duration(#[case] input: &str, #[case] millis: i64) {
        assert_eq!(parse_duration(input).unwrap(), Duration::from_millis(millis));
    }

    #[rstest]
    #[case::empty("")]
    #[case::bare_number("5")]
    #[case::unknown_unit("5x")]
    #[case::wrong_order("1m1h")]
    #[case::repeated_unit("1m1m")]
    #[case::fraction("1.5h")]
    #[case::negative("-5m")]
    #[case::whitespace(" 5m")]
    fn test_parse_duration_rejects(#[case] input: &str) {
        let err = parse_duration(input).unwrap_err();
        assert!(matches!(err, AstError::InvalidDuration { input: ref i, .. } if i == input));
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        let err = parse_duration("99999999999999999999y").unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = parse_duration("300000000y").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_duration_from_str() {
        let d: Duration = "10m".parse().unwrap();
        assert_eq!(d, Duration::from_mins(10));
        assert!("ten minutes".parse::<Duration>().is_err());
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    #[rstest]
    #[case(Duration::ZERO, "0s")]
    #[case(Duration::from_millis(1_500), "1s500ms")]
    #[case(Duration::from_mins(90), "1h30m")]
    #[case(Duration::from_days(5), "5d")]
    #[case(Duration::from_days(14), "2w")]
    #[case(Duration::from_days(90), "90d")]
    #[case(Duration::from_days(365), "1y")]
    #[case(Duration::from_days(366), "366d")]
    #[case(Duration::from_days(7) + Duration::from_hours(1), "7d1h")]
    #[case(-Duration::from_mins(5), "-5m")]
    fn test_format_duration(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(format_duration(duration), expected);
        assert_eq!(duration.to_string(), expected);
    }

    #[rstest]
    #[case("5m")]
    #[case("1h30m")]
    #[case("2w")]
    #[case("3d4h")]
    #[case("1y")]
    #[case("250ms")]
    fn test_canonical_literals_round_trip(#[case] literal: &str) {
        assert_eq!(format_duration(parse_duration(literal).unwrap()), literal);
    }

    #[rstest]
    #[case(Duration::from_secs(59))]
    #[case(Duration::from_secs(61))]
    #[case(Duration::from_mins(59))]
    #[case(Duration::from_mins(61))]
    #[case(Duration::from_hours(23))]
    #[case(Duration::from_hours(25))]
    #[case(Duration::from_days(6))]
    #[case(Duration::from_days(8))]
    #[case(Duration::from_days(400))]
    #[case(Duration::from_millis(86_400_001))]
    fn test_formatted_durations_parse_back(#[case] duration: Duration) {
        assert_eq!(parse_duration(&format_duration(duration)).unwrap(), duration);
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    #[test]
    fn test_from_std_duration() {
        let d = Duration::try_from(std::time::Duration::from_secs(90)).unwrap();
        assert_eq!(d, Duration::from_secs(90));
        assert!(Duration::try_from(std::time::Duration::MAX).is_err());
    }

    #[test]
    fn test_unit_constructors_saturate() {
        assert_eq!(Duration::from_weeks(i64::MAX).as_millis(), i64::MAX);
        assert_eq!(Duration::from_secs(i64::MIN).as_millis(), i64::MIN);
        assert_eq!(Duration::from_days(-i64::MAX).as_millis(), i64::MIN);
    }

    #[test]
    fn test_sign_helpers() {
        let d = -Duration::from_secs(3);
        assert!(d.is_negative());
        assert_eq!(d.abs(), Duration::from_secs(3));
        assert!(Duration::ZERO.is_zero());
        assert_eq!(d.as_millis(), -3_000);
    }
}
