//! Integration tests for the composition engine

use lintstack_core::{
    Composer, DomainOptions, DomainSpec, Fragment, LintstackError, OptionResolver, OptionTree,
    Pipeline, Plugin, PluginHandle, PluginRenaming, RuleSetting, Severity, StaticProbe, compose,
    producer_fn, ready, task,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn resolver() -> OptionResolver {
    OptionResolver::new(Arc::new(StaticProbe::empty()))
}

#[tokio::test]
async fn test_order_follows_declaration_not_completion() {
    let slow_b = task(async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(vec![Fragment::named("ns/b/1"), Fragment::named("ns/b/2")])
    });
    let fast_a = task(async { Ok(vec![Fragment::named("ns/a/1"), Fragment::named("ns/a/2")]) });

    let composed = Composer::new()
        .append_task(fast_a)
        .append_task(slow_b)
        .compose()
        .await
        .unwrap();

    assert_eq!(composed.names(), vec!["ns/a/1", "ns/a/2", "ns/b/1", "ns/b/2"]);
}

#[tokio::test]
async fn test_slow_first_task_still_comes_first() {
    let finished = Arc::new(AtomicUsize::new(0));

    let order = finished.clone();
    let slow_a = task(async move {
        tokio::time::sleep(Duration::from_millis(40)).await;
        order.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Fragment::named("ns/a")])
    });
    let order = finished.clone();
    let fast_b = task(async move {
        order.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Fragment::named("ns/b")])
    });

    let composed = compose(vec![slow_a, fast_b], vec![]).await.unwrap();
    assert_eq!(composed.names(), vec!["ns/a", "ns/b"]);
    assert_eq!(finished.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_extras_follow_generated_fragments() {
    let composed = compose(
        vec![
            ready(vec![Fragment::named("ns/one")]),
            task(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(vec![Fragment::named("ns/two")])
            }),
        ],
        vec![Fragment::named("user/z"), Fragment::new(), Fragment::named("user/a")],
    )
    .await
    .unwrap();

    let names: Vec<Option<&str>> = composed.fragments().iter().map(Fragment::name).collect();
    assert_eq!(
        names,
        vec![Some("ns/one"), Some("ns/two"), Some("user/z"), None, Some("user/a")]
    );
}

#[tokio::test]
async fn test_duplicate_names_fail_with_both_positions() {
    let err = compose(
        vec![ready(vec![Fragment::named("ns/javascript/rules"), Fragment::named("ns/other")])],
        vec![Fragment::named("ns/javascript/rules")],
    )
    .await
    .unwrap_err();

    match err {
        LintstackError::DuplicateFragmentName { name, first, second } => {
            assert_eq!(name, "ns/javascript/rules");
            assert_eq!((first, second), (0, 2));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unique_names_compose() {
    let composed = compose(
        vec![ready((0..20).map(|i| Fragment::named(format!("ns/{i}"))).collect())],
        vec![],
    )
    .await
    .unwrap();
    assert_eq!(composed.len(), 20);
}

#[tokio::test]
async fn test_rename_pass_is_pure() {
    let implementation = PluginHandle::new(Plugin::new("eslint-plugin-long").with_rules(["rule-a"]));
    let original = Fragment::named("ns/long")
        .files(["**/*.ts", "**/*.mts"])
        .ignores(["**/*.d.ts"])
        .plugin("@long/ns", implementation.clone())
        .rule("@long/ns/rule-a", Severity::Error);

    let composed = Composer::new()
        .rename_plugins(PluginRenaming::from_pairs([("@long/ns", "short")]))
        .append(vec![original.clone()])
        .compose()
        .await
        .unwrap();

    assert_eq!(composed.len(), 1);
    let renamed = &composed.fragments()[0];
    assert!(renamed.plugin_bindings["short"].ptr_eq(&implementation));
    assert_eq!(renamed.plugin_bindings.len(), 1);
    assert_eq!(renamed.rule_setting("short/rule-a"), Some(&RuleSetting::error()));
    assert_eq!(renamed.rule_settings.len(), 1);
    assert_eq!(renamed.file_patterns, original.file_patterns);
    assert_eq!(renamed.ignore_patterns, original.ignore_patterns);

    // the caller's copy keeps its verbose keys
    assert!(original.plugin_bindings.contains_key("@long/ns"));
    assert!(original.rule_setting("@long/ns/rule-a").is_some());
}

#[tokio::test]
async fn test_rename_collision_aborts_composition() {
    let plugin = PluginHandle::new(Plugin::new("eslint-plugin-yml"));
    let err = compose(
        vec![ready(vec![
            Fragment::named("ns/yaml")
                .plugin("yml", plugin.clone())
                .plugin("yaml", plugin),
        ])],
        vec![],
    )
    .await
    .unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("yml"));
}

#[tokio::test]
async fn test_producer_error_aborts_whole_composition() {
    let sibling_finished = Arc::new(AtomicUsize::new(0));
    let flag = sibling_finished.clone();

    let result = Composer::new()
        .append(vec![Fragment::named("ns/ok")])
        .append_task(task(async {
            Err(LintstackError::incompatible_options(
                "formatters",
                "`slidev` option only works when `markdown` is enabled",
            ))
        }))
        .append_task(task(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            flag.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Fragment::named("ns/late")])
        }))
        .compose()
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, LintstackError::IncompatibleOptions { ref domain, .. } if domain == "formatters"));
    // the failing task wins the join before the slow sibling finishes
    assert_eq!(sibling_finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let markup_calls = Arc::new(AtomicUsize::new(0));
    let markup_counter = markup_calls.clone();

    let pipeline = Pipeline::new()
        .stage(
            DomainSpec::enabled("scripts"),
            producer_fn(|options: DomainOptions| async move {
                Ok(vec![
                    Fragment::named("ns/scripts/rules")
                        .files(["**/*.js"])
                        .rule("no-var", Severity::Error)
                        .with_overrides(&options.overrides()),
                ])
            }),
        )
        .stage(
            DomainSpec::enabled("markup"),
            producer_fn(move |_options: DomainOptions| {
                markup_counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(vec![Fragment::named("ns/markup/rules")]) }
            }),
        )
        .stage(
            DomainSpec::enabled("data"),
            producer_fn(|options: DomainOptions| async move {
                Ok(vec![
                    Fragment::named("ns/data/rules")
                        .files(["**/*.json"])
                        .rule("foo/bar", Severity::Error)
                        .rule("foo/baz", Severity::Error)
                        .with_overrides(&options.overrides()),
                ])
            }),
        );

    let tree = OptionTree::from_value(json!({
        "scripts": true,
        "markup": false,
        "data": { "overrides": { "foo/bar": "warn" } }
    }));
    let tasks = pipeline.into_tasks(&tree, &resolver());
    let composed = compose(tasks, vec![]).await.unwrap();

    assert_eq!(markup_calls.load(Ordering::SeqCst), 0);
    assert_eq!(composed.names(), vec!["ns/scripts/rules", "ns/data/rules"]);

    let data = composed.get("ns/data/rules").unwrap();
    assert_eq!(data.rule_setting("foo/bar"), Some(&RuleSetting::warn()));
    assert_eq!(data.rule_setting("foo/baz"), Some(&RuleSetting::error()));
    assert!(composed.position("ns/scripts/rules") < composed.position("ns/data/rules"));
}

#[tokio::test]
async fn test_shared_plugin_across_fragments_is_consistent() {
    let ts = PluginHandle::new(Plugin::new("@typescript-eslint/eslint-plugin"));
    let composed = compose(
        vec![
            ready(vec![Fragment::named("ns/typescript/setup").plugin("@typescript-eslint", ts.clone())]),
            ready(vec![Fragment::named("ns/typescript/rules")
                .rule("@typescript-eslint/no-explicit-any", Severity::Off)]),
        ],
        vec![Fragment::named("user/ts").rule("@typescript-eslint/no-unused-vars", Severity::Warn)],
    )
    .await
    .unwrap();

    assert!(composed.fragments()[0].plugin_bindings["ts"].ptr_eq(&ts));
    assert!(composed.get("ns/typescript/rules").unwrap().rule_setting("ts/no-explicit-any").is_some());
    // user fragments are renamed like generated ones
    assert!(composed.get("user/ts").unwrap().rule_setting("ts/no-unused-vars").is_some());
}
