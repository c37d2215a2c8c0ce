#[cfg(test)]
mod tests {
    use promql_ast::ast::{AggregateOp, Aggregation, Expr, InstantSelector, LabelMatcher, Subquery};
    use promql_ast::builder::*;
    use promql_ast::duration::Duration;
    use promql_ast::output::{DEFAULT_MAX_LINE_WIDTH, Printer, render, render_pretty};

    fn requests(with_code: bool) -> InstantSelector {
        let mut selector = InstantSelector::new("http_requests_total");
        if with_code {
            selector = selector.with_matcher(LabelMatcher::regex_match("code", "5.."));
        }
        selector.with_matchers([
            LabelMatcher::equal("handler", "query"),
            LabelMatcher::regex_match("job", "thanos-query-example-query"),
            LabelMatcher::equal("namespace", "thanos-operator-system"),
        ])
    }

    fn error_ratio(errors: Expr, total: Expr) -> Expr {
        mul(
            div(
                sum(errors).by(&["namespace", "job", "code"]),
                sum(total).by(&["namespace", "job"]),
            )
            .ignoring(&["code"])
            .group_left(&[]),
            number(100.0),
        )
        .into()
    }

    fn lines(lines: &[&str]) -> String {
        lines.join("\n")
    }

    // ========================================================================
    // Split Layout
    // ========================================================================

    #[test]
    fn test_pretty_error_ratio() {
        let expr = error_ratio(
            rate(requests(true).range(Duration::from_mins(5))).into(),
            rate(requests(false).range(Duration::from_mins(5))).into(),
        );

        let expected = lines(&[
            "    sum by (namespace, job, code) (",
            "      rate(",
            r#"        http_requests_total{code=~"5..",handler="query",job=~"thanos-query-example-query",namespace="thanos-operator-system"}[5m]"#,
            "      )",
            "    )",
            "  / ignoring (code) group_left ()",
            "    sum by (namespace, job) (",
            "      rate(",
            r#"        http_requests_total{handler="query",job=~"thanos-query-example-query",namespace="thanos-operator-system"}[5m]"#,
            "      )",
            "    )",
            "*",
            "  100",
        ]);
        assert_eq!(render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_error_ratio_with_range_variable() {
        let expr = error_ratio(
            rate(requests(true).range_variable("$__rate_interval")).into(),
            rate(requests(false).range_variable("$__rate_interval")).into(),
        );

        let expected = lines(&[
            "    sum by (namespace, job, code) (",
            "      rate(",
            r#"        http_requests_total{code=~"5..",handler="query",job=~"thanos-query-example-query",namespace="thanos-operator-system"}[$__rate_interval]"#,
            "      )",
            "    )",
            "  / ignoring (code) group_left ()",
            "    sum by (namespace, job) (",
            "      rate(",
            r#"        http_requests_total{handler="query",job=~"thanos-query-example-query",namespace="thanos-operator-system"}[$__rate_interval]"#,
            "      )",
            "    )",
            "*",
            "  100",
        ]);
        assert_eq!(render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_parenthesis() {
        let upload_time = InstantSelector::new("thanos_objstore_last_successful_upload_time")
            .with_matchers([
                LabelMatcher::regex_match("job", "thanos-compactor"),
                LabelMatcher::equal("namespace", "thanos-operator-system"),
            ])
            .range(Duration::from_days(5));
        let expr: Expr = div(paren(sub(time(), upload_time)), number(100.0)).into();

        let expected = lines(&[
            "  (",
            "      time()",
            "    -",
            r#"      thanos_objstore_last_successful_upload_time{job=~"thanos-compactor",namespace="thanos-operator-system"}[5d]"#,
            "  )",
            "/",
            "  100",
        ]);
        assert_eq!(render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_narrow_printer_splits_calls() {
        let expr: Expr = sum(rate(InstantSelector::new("foo").range(Duration::from_mins(5)))).into();
        let printer = Printer::new().with_max_line_width(10);

        let expected = lines(&["sum(", "  rate(", "    foo[5m]", "  )", ")"]);
        assert_eq!(printer.render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_call_without_arguments_stays_whole() {
        let expr: Expr = call("a_really_long_function_name", vec![]).into();
        let printer = Printer::new().with_max_line_width(5);

        assert_eq!(
            printer.render_pretty(&expr, 1).unwrap(),
            "  a_really_long_function_name()"
        );
    }

    #[test]
    fn test_pretty_parameter_on_its_own_line() {
        let expr: Expr = topk(5.0, rate(InstantSelector::new("foo").range(Duration::from_mins(5)))).into();
        let printer = Printer::new().with_max_line_width(10);

        let expected = lines(&["topk(", "  5,", "  rate(", "    foo[5m]", "  )", ")"]);
        assert_eq!(printer.render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_call_arguments_separated_by_commas() {
        let buckets = InstantSelector::new("x_bucket").range(Duration::from_mins(5));
        let expr: Expr = histogram_quantile(0.9, rate(buckets)).into();
        let printer = Printer::new().with_max_line_width(20);

        let expected = lines(&["histogram_quantile(", "  0.9,", "  rate(x_bucket[5m])", ")"]);
        assert_eq!(printer.render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_subquery_suffix_follows_inner_block() {
        let inner = rate(InstantSelector::new("foo").range(Duration::from_mins(5)));
        let expr: Expr = Subquery::new(inner, Duration::from_mins(30))
            .with_step(Duration::from_mins(1))
            .into();
        let printer = Printer::new().with_max_line_width(10);

        let expected = lines(&["rate(", "  foo[5m]", ")[30m:1m]"]);
        assert_eq!(printer.render_pretty(&expr, 0).unwrap(), expected);
    }

    #[test]
    fn test_pretty_unary_prefixes_inner_block() {
        let expr: Expr = neg(sum(rate(InstantSelector::new("foo").range(Duration::from_mins(5))))).into();
        let printer = Printer::new().with_max_line_width(10);

        let expected = lines(&["-sum(", "  rate(", "    foo[5m]", "  )", ")"]);
        assert_eq!(printer.render_pretty(&expr, 0).unwrap(), expected);
    }

    // ========================================================================
    // Single-Line Layout
    // ========================================================================

    #[test]
    fn test_pretty_short_expression_stays_on_one_line() {
        let expr: Expr = sum(rate(InstantSelector::new("foo").range(Duration::from_mins(5))))
            .by(&["job"])
            .into();

        assert_eq!(render_pretty(&expr, 0).unwrap(), render(&expr).unwrap());
        assert_eq!(
            render_pretty(&expr, 2).unwrap(),
            format!("    {}", render(&expr).unwrap())
        );
    }

    #[test]
    fn test_pretty_long_selector_is_never_split() {
        let expr: Expr = requests(true).into();
        let line = render(&expr).unwrap();

        assert!(line.len() > DEFAULT_MAX_LINE_WIDTH);
        assert_eq!(render_pretty(&expr, 1).unwrap(), format!("  {line}"));
    }

    #[test]
    fn test_pretty_step_invariant_is_transparent() {
        let expr: Expr = step_invariant(InstantSelector::new("up")).into();
        assert_eq!(render_pretty(&expr, 1).unwrap(), "  up");
    }

    // ========================================================================
    // Malformed Nodes
    // ========================================================================

    #[test]
    fn test_pretty_rejects_malformed_aggregation() {
        let expr: Expr = add(Aggregation::new(AggregateOp::CountValues, requests(true)), number(1.0)).into();
        assert!(render_pretty(&expr, 0).is_err());
    }
}
