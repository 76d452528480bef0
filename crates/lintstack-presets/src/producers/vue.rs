use lintstack_core::{DomainOptions, Fragment, Processor, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{ERROR, OFF, WARN, error_with, ns, object};
use crate::context::PresetContext;
use crate::globs::GLOB_VUE;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VueOptions {
    pub a11y: bool,
    pub vue_version: u8,
    /// `false` disables SFC block processing, an object configures it
    pub sfc_blocks: Value,
    pub files: Option<Vec<String>>,
}

impl Default for VueOptions {
    fn default() -> Self {
        Self {
            a11y: false,
            vue_version: 3,
            sfc_blocks: Value::Bool(true),
            files: None,
        }
    }
}

const A11Y_PACKAGE: &str = "eslint-plugin-vuejs-accessibility";

const A11Y_ERRORS: &[&str] = &[
    "alt-text",
    "anchor-has-content",
    "aria-props",
    "aria-role",
    "aria-unsupported-elements",
    "click-events-have-key-events",
    "form-control-has-label",
    "heading-has-content",
    "iframe-has-title",
    "interactive-supports-focus",
    "label-has-for",
    "mouse-events-have-key-events",
    "no-access-key",
    "no-aria-hidden-on-focusable",
    "no-distracting-elements",
    "no-redundant-roles",
    "no-role-presentation-on-focusable",
    "no-static-element-interactions",
    "role-has-required-aria-props",
];

const A11Y_WARNINGS: &[&str] = &["media-has-caption", "no-autofocus", "tabindex-no-positive"];

const VUE2_RULES: &[&str] = &[
    "vue/no-custom-modifiers-on-v-model",
    "vue/no-multiple-template-root",
    "vue/no-v-for-template-key",
    "vue/valid-v-bind-sync",
];

const VUE3_RULES: &[&str] = &[
    "vue/no-deprecated-destroyed-lifecycle",
    "vue/no-deprecated-dollar-listeners-api",
    "vue/no-deprecated-events-api",
    "vue/no-deprecated-v-on-native-modifier",
    "vue/no-v-for-template-key-on-child",
    "vue/require-explicit-emits",
    "vue/valid-v-model",
];

/// Formatting rules left to the formatters domain
const FORMATTER_OWNED: &[&str] = &[
    "vue/max-len",
    "vue/html-self-closing",
    "vue/html-closing-bracket-newline",
    "vue/html-closing-bracket-spacing",
    "vue/html-end-tags",
    "vue/html-indent",
    "vue/html-quotes",
    "vue/max-attributes-per-line",
    "vue/multiline-html-element-content-newline",
    "vue/mustache-interpolation-spacing",
    "vue/no-multi-spaces",
    "vue/no-spaces-around-equal-signs-in-attribute",
    "vue/singleline-html-element-content-newline",
];

fn processor(sfc_blocks: &Value, blocks_package: &str) -> Processor {
    let vue = Processor::Named("vue/.vue".to_string());
    if sfc_blocks == &Value::Bool(false) {
        return vue;
    }
    Processor::Merged(vec![vue, Processor::Named(blocks_package.to_string())])
}

pub async fn vue(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let opts: VueOptions = options.typed();
    let files = opts.files.clone().unwrap_or_else(|| vec![GLOB_VUE.to_string()]);

    if opts.a11y {
        ctx.catalog.ensure_packages(&[A11Y_PACKAGE]).await?;
    }
    let (plugin, parser, blocks) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-vue"),
        ctx.catalog.acquire("vue-eslint-parser"),
        ctx.catalog.acquire("eslint-processor-vue-blocks"),
    )?;
    let a11y = if opts.a11y {
        Some(ctx.catalog.acquire(A11Y_PACKAGE).await?)
    } else {
        None
    };
    let ts_parser = if ctx.has_typescript {
        let parser = ctx.catalog.acquire("@typescript-eslint/parser").await?;
        Value::String(parser.package().to_string())
    } else {
        Value::Null
    };

    let mut setup = Fragment::named(ns("vue/setup"))
        // auto-imported composition API
        .language_settings(object(json!({
            "globals": {
                "computed": "readonly",
                "defineEmits": "readonly",
                "defineExpose": "readonly",
                "defineProps": "readonly",
                "onMounted": "readonly",
                "onUnmounted": "readonly",
                "reactive": "readonly",
                "ref": "readonly",
                "shallowReactive": "readonly",
                "shallowRef": "readonly",
                "toRef": "readonly",
                "toRefs": "readonly",
                "watch": "readonly",
                "watchEffect": "readonly"
            }
        })))
        .plugin("vue", plugin);
    if let Some(a11y) = a11y {
        setup = setup.plugin("vue-a11y", a11y);
    }

    let version_rules = if opts.vue_version == 2 { VUE2_RULES } else { VUE3_RULES };

    let mut rules = Fragment::named(ns("vue/rules"))
        .files(files)
        .language_settings(object(json!({
            "parser": parser.package(),
            "parserOptions": {
                "ecmaFeatures": { "jsx": true },
                "extraFileExtensions": [".vue"],
                "parser": ts_parser,
                "sourceType": "module"
            }
        })))
        .processor(processor(&opts.sfc_blocks, blocks.package()))
        .rules(version_rules.iter().map(|r| (*r, ERROR)))
        .rule("n/prefer-global/process", OFF)
        .rule(
            "vue/block-order",
            error_with([json!({ "order": ["template", "script", "style"] })]),
        )
        .rule("vue/component-name-in-template-casing", error_with([json!("PascalCase")]))
        .rule("vue/component-options-name-casing", error_with([json!("PascalCase")]))
        // deprecated
        .rule("vue/component-tags-order", OFF)
        .rule("vue/custom-event-name-casing", error_with([json!("camelCase")]))
        .rule(
            "vue/define-macros-order",
            error_with([json!({
                "order": ["defineOptions", "defineProps", "defineEmits", "defineSlots"]
            })]),
        )
        .rule("vue/dot-notation", error_with([json!({ "allowKeywords": true })]))
        .rule("vue/eqeqeq", error_with([json!("smart")]))
        .rules([
            ("vue/multi-word-component-names", OFF),
            ("vue/no-dupe-keys", OFF),
            ("vue/no-empty-pattern", ERROR),
            ("vue/no-irregular-whitespace", ERROR),
            ("vue/no-loss-of-precision", ERROR),
        ])
        .rule(
            "vue/no-restricted-syntax",
            error_with([
                json!("DebuggerStatement"),
                json!("LabeledStatement"),
                json!("WithStatement"),
            ]),
        )
        .rule("vue/no-restricted-v-bind", error_with([json!("/^v-/")]))
        .rules([
            ("vue/no-setup-props-reactivity-loss", OFF),
            ("vue/no-sparse-arrays", ERROR),
            ("vue/no-unused-refs", ERROR),
            ("vue/no-useless-v-bind", ERROR),
            ("vue/no-v-html", OFF),
        ])
        .rule(
            "vue/object-shorthand",
            error_with([
                json!("always"),
                json!({ "avoidQuotes": true, "ignoreConstructors": false }),
            ]),
        )
        .rules([
            ("vue/prefer-separate-static-class", ERROR),
            ("vue/prefer-template", ERROR),
        ])
        .rule("vue/prop-name-casing", error_with([json!("camelCase")]))
        .rules([
            ("vue/require-default-prop", OFF),
            ("vue/require-prop-types", OFF),
        ])
        .rules(FORMATTER_OWNED.iter().map(|r| (*r, OFF)))
        .rule(
            "unicorn/filename-case",
            error_with([json!({ "cases": { "kebabCase": true, "pascalCase": true } })]),
        );

    if opts.a11y {
        rules = rules
            .rules(A11Y_ERRORS.iter().map(|r| (format!("vue-a11y/{r}"), ERROR)))
            .rules(A11Y_WARNINGS.iter().map(|r| (format!("vue-a11y/{r}"), WARN)));
    }

    Ok(vec![setup, rules.with_overrides(&options.overrides())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use lintstack_core::{ErrorKind, PackageProbe, StaticProbe};

    fn ctx_with(installed: &[&str]) -> Arc<PresetContext> {
        let probe: Arc<dyn PackageProbe> = Arc::new(StaticProbe::new(installed.iter().copied()));
        Arc::new(PresetContext::new(
            Arc::new(BuiltinCatalog::new(probe.clone())),
            probe,
        ))
    }

    #[tokio::test]
    async fn test_a11y_requires_optional_package() {
        let options = DomainOptions::empty("vue").with("a11y", json!(true));
        let err = vue(options.clone(), ctx_with(&[])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Acquisition);

        let fragments = vue(options, ctx_with(&[A11Y_PACKAGE])).await.unwrap();
        assert!(fragments[0].plugin_bindings.contains_key("vue-a11y"));
        assert!(fragments[1].rule_setting("vue-a11y/alt-text").is_some());
    }

    #[tokio::test]
    async fn test_sfc_blocks_can_be_disabled() {
        let fragments = vue(
            DomainOptions::empty("vue").with("sfcBlocks", json!(false)),
            ctx_with(&[]),
        )
        .await
        .unwrap();
        assert_eq!(
            fragments[1].processor,
            Some(Processor::Named("vue/.vue".to_string()))
        );
    }

    #[tokio::test]
    async fn test_vue2_rule_set() {
        let fragments = vue(
            DomainOptions::empty("vue").with("vueVersion", json!(2)),
            ctx_with(&[]),
        )
        .await
        .unwrap();
        assert!(fragments[1].rule_setting("vue/valid-v-bind-sync").is_some());
        assert!(fragments[1].rule_setting("vue/require-explicit-emits").is_none());
    }
}
