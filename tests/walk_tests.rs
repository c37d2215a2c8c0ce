#[cfg(test)]
mod tests {
    use promql_ast::ast::{Expr, InstantSelector};
    use promql_ast::builder::*;
    use promql_ast::duration::Duration;
    use promql_ast::output::render;
    use promql_ast::walk::{
        Visitor, Walk, children, children_mut, inspect, rewrite, walk, walk_with_path,
    };

    /// `sum(rate(foo[5m])) + 1`
    fn sample() -> Expr {
        add(
            sum(rate(InstantSelector::new("foo").range(Duration::from_mins(5)))),
            number(1.0),
        )
        .into()
    }

    #[derive(Default)]
    struct Recorder {
        visited: Vec<&'static str>,
        left: Vec<&'static str>,
        depths: Vec<usize>,
        outermost: Vec<Option<&'static str>>,
        skip_kind: Option<&'static str>,
        fail_kind: Option<&'static str>,
    }

    impl<'a> Visitor<'a> for Recorder {
        type Error = String;

        fn visit(&mut self, node: &'a Expr, path: &[&'a Expr]) -> Result<Walk, String> {
            if self.fail_kind == Some(node.kind()) {
                return Err(format!("stopped at {}", node.kind()));
            }
            self.visited.push(node.kind());
            self.depths.push(path.len());
            self.outermost.push(path.first().map(|n| n.kind()));
            if self.skip_kind == Some(node.kind()) {
                return Ok(Walk::Skip);
            }
            Ok(Walk::Continue)
        }

        fn leave(&mut self, node: &'a Expr) -> Result<(), String> {
            self.left.push(node.kind());
            Ok(())
        }
    }

    // ========================================================================
    // Visiting Order
    // ========================================================================

    #[test]
    fn test_walk_pre_order() {
        let expr = sample();
        let mut recorder = Recorder::default();
        walk(&mut recorder, &expr).unwrap();

        assert_eq!(
            recorder.visited,
            vec![
                "binary operation",
                "aggregation",
                "call",
                "range selector",
                "instant selector",
                "number literal",
            ]
        );
        assert_eq!(recorder.depths, vec![0, 1, 2, 3, 4, 1]);
    }

    #[test]
    fn test_walk_leaves_in_post_order() {
        let expr = sample();
        let mut recorder = Recorder::default();
        walk(&mut recorder, &expr).unwrap();

        assert_eq!(
            recorder.left,
            vec![
                "instant selector",
                "range selector",
                "call",
                "aggregation",
                "number literal",
                "binary operation",
            ]
        );
    }

    #[test]
    fn test_walk_skip_prunes_subtree() {
        let expr = sample();
        let mut recorder = Recorder {
            skip_kind: Some("call"),
            ..Default::default()
        };
        walk(&mut recorder, &expr).unwrap();

        assert_eq!(
            recorder.visited,
            vec!["binary operation", "aggregation", "call", "number literal"]
        );
        assert!(!recorder.left.contains(&"call"));
        assert_eq!(recorder.left.len(), 3);
    }

    #[test]
    fn test_walk_error_aborts() {
        let expr = sample();
        let mut recorder = Recorder {
            fail_kind: Some("range selector"),
            ..Default::default()
        };
        let err = walk(&mut recorder, &expr).unwrap_err();

        assert_eq!(err, "stopped at range selector");
        assert_eq!(recorder.visited, vec!["binary operation", "aggregation", "call"]);
        assert!(recorder.left.is_empty());
    }

    #[test]
    fn test_walk_with_path_sees_outer_prefix() {
        let outer: Expr = paren(number(0.0)).into();
        let expr = sample();
        let mut path = vec![&outer];
        let mut recorder = Recorder::default();
        walk_with_path(&mut recorder, &expr, &mut path).unwrap();

        assert_eq!(recorder.depths, vec![1, 2, 3, 4, 5, 2]);
        assert!(recorder.outermost.iter().all(|k| *k == Some("parenthesis")));
        assert_eq!(path.len(), 1);
        assert!(std::ptr::eq(path[0], &outer));
    }

    #[test]
    fn test_walk_with_path_restores_path_on_error() {
        let outer: Expr = paren(number(0.0)).into();
        let expr = sample();
        let mut path = vec![&outer];
        let mut recorder = Recorder {
            fail_kind: Some("instant selector"),
            ..Default::default()
        };
        let err = walk_with_path(&mut recorder, &expr, &mut path).unwrap_err();

        assert_eq!(err, "stopped at instant selector");
        assert_eq!(recorder.depths, vec![1, 2, 3, 4]);
        assert_eq!(path.len(), 1);
        assert!(std::ptr::eq(path[0], &outer));
    }

    #[test]
    fn test_walk_leaf_root() {
        let expr: Expr = number(3.0).into();
        let mut recorder = Recorder::default();
        walk(&mut recorder, &expr).unwrap();

        assert_eq!(recorder.visited, vec!["number literal"]);
        assert_eq!(recorder.left, vec!["number literal"]);
    }

    // ========================================================================
    // Inspect
    // ========================================================================

    #[test]
    fn test_inspect_sees_ancestors() {
        let expr = sample();
        let mut ancestry = Vec::new();
        inspect(&expr, |node, path| {
            if matches!(node, Expr::InstantSelector(_)) {
                ancestry = path.iter().map(|n| n.kind()).collect();
            }
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(
            ancestry,
            vec!["binary operation", "aggregation", "call", "range selector"]
        );
    }

    #[test]
    fn test_inspect_path_starts_at_root() {
        let expr = sample();
        inspect(&expr, |_, path| {
            if let Some(root) = path.first() {
                assert!(std::ptr::eq(*root, &expr));
            }
            Ok::<(), ()>(())
        })
        .unwrap();
    }

    #[test]
    fn test_inspect_returns_first_error() {
        let expr = sample();
        let mut seen = 0;
        let result = inspect(&expr, |node, _| {
            seen += 1;
            match node {
                Expr::Call(call) => Err(call.func.clone()),
                _ => Ok(()),
            }
        });

        assert_eq!(result, Err("rate".to_string()));
        assert_eq!(seen, 3);
    }

    // ========================================================================
    // Children
    // ========================================================================

    #[test]
    fn test_children_of_aggregation_put_inner_first() {
        let expr: Expr = topk(5.0, InstantSelector::new("foo")).into();
        let kinds: Vec<_> = children(&expr).iter().map(|c| c.kind()).collect();

        assert_eq!(kinds, vec!["instant selector", "number literal"]);
    }

    #[test]
    fn test_children_of_call_in_argument_order() {
        let expr: Expr = clamp(InstantSelector::new("foo"), 0.0, 1.0).into();
        let rendered: Vec<_> = children(&expr)
            .into_iter()
            .map(|c| render(c).unwrap())
            .collect();

        assert_eq!(rendered, vec!["foo", "0", "1"]);
    }

    #[test]
    fn test_children_of_leaves_are_empty() {
        assert!(children(&InstantSelector::new("foo").into()).is_empty());
        assert!(children(&string("x").into()).is_empty());
        assert!(children(&time().into()).is_empty());
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    #[test]
    fn test_children_mut_edits_in_place() {
        let mut expr: Expr = add(number(1.0), number(2.0)).into();
        for child in children_mut(&mut expr) {
            if let Expr::NumberLiteral(n) = child {
                n.value *= 10.0;
            }
        }

        assert_eq!(render(&expr).unwrap(), "10 + 20");
    }

    #[test]
    fn test_rewrite_renames_metrics() {
        let mut expr = sample();
        rewrite(&mut expr, &mut |node: &mut Expr| {
            if let Expr::InstantSelector(s) = node {
                s.name = Some("bar".to_string());
            }
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(render(&expr).unwrap(), "sum(rate(bar[5m])) + 1");
    }

    #[test]
    fn test_rewrite_replaces_nodes_bottom_up() {
        let mut expr: Expr = mul(paren(add(number(1.0), number(2.0))), number(3.0)).into();
        let mut order = Vec::new();
        rewrite(&mut expr, &mut |node: &mut Expr| {
            order.push(node.kind());
            let unwrapped = match node {
                Expr::Paren(p) => Some((*p.expr).clone()),
                _ => None,
            };
            if let Some(inner) = unwrapped {
                *node = inner;
            }
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(order.first(), Some(&"number literal"));
        assert_eq!(order.last(), Some(&"binary operation"));
        assert_eq!(render(&expr).unwrap(), "1 + 2 * 3");
    }
}
