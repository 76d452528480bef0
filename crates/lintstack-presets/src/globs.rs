//! File globs shared by the producers

pub const GLOB_SRC_EXT: &str = "?([cm])[jt]s?(x)";
pub const GLOB_SRC: &str = "**/*.?([cm])[jt]s?(x)";

pub const GLOB_JS: &str = "**/*.?([cm])js";
pub const GLOB_JSX: &str = "**/*.?([cm])jsx";

pub const GLOB_TS: &str = "**/*.?([cm])ts";
pub const GLOB_TSX: &str = "**/*.?([cm])tsx";
pub const GLOB_DTS: &str = "**/*.d.?([cm])ts";

pub const GLOB_STYLE: &str = "**/*.{c,le,sc}ss";
pub const GLOB_CSS: &str = "**/*.css";
pub const GLOB_POSTCSS: &str = "**/*.{p,post}css";
pub const GLOB_LESS: &str = "**/*.less";
pub const GLOB_SCSS: &str = "**/*.scss";

pub const GLOB_JSON: &str = "**/*.json";
pub const GLOB_JSON5: &str = "**/*.json5";
pub const GLOB_JSONC: &str = "**/*.jsonc";

pub const GLOB_MARKDOWN: &str = "**/*.md";
pub const GLOB_MARKDOWN_IN_MARKDOWN: &str = "**/*.md/*.md";
pub const GLOB_MARKDOWN_CODE: &str = "**/*.md/**/*.?([cm])[jt]s?(x)";

pub const GLOB_VUE: &str = "**/*.vue";
pub const GLOB_ASTRO: &str = "**/*.astro";
pub const GLOB_ASTRO_TS: &str = "**/*.astro/*.ts";
pub const GLOB_YAML: &str = "**/*.y?(a)ml";
pub const GLOB_TOML: &str = "**/*.toml";
pub const GLOB_XML: &str = "**/*.xml";
pub const GLOB_SVG: &str = "**/*.svg";
pub const GLOB_HTML: &str = "**/*.htm?(l)";
pub const GLOB_GRAPHQL: &str = "**/*.{g,graph}ql";

pub const GLOB_TESTS: &[&str] = &[
    "**/__tests__/**/*.?([cm])[jt]s?(x)",
    "**/*.spec.?([cm])[jt]s?(x)",
    "**/*.test.?([cm])[jt]s?(x)",
    "**/*.bench.?([cm])[jt]s?(x)",
    "**/*.benchmark.?([cm])[jt]s?(x)",
];

pub const GLOB_EXCLUDE: &[&str] = &[
    "**/node_modules",
    "**/dist",
    "**/package-lock.json",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/bun.lockb",
    "**/output",
    "**/coverage",
    "**/temp",
    "**/.temp",
    "**/tmp",
    "**/.tmp",
    "**/.history",
    "**/.vitepress/cache",
    "**/.nuxt",
    "**/.next",
    "**/.svelte-kit",
    "**/.vercel",
    "**/.changeset",
    "**/.idea",
    "**/.cache",
    "**/.output",
    "**/.vite-inspect",
    "**/.yarn",
    "**/vite.config.*.timestamp-*",
    "**/CHANGELOG*.md",
    "**/*.min.*",
    "**/LICENSE*",
    "**/__snapshots__",
    "**/auto-import?(s).d.ts",
    "**/components.d.ts",
];

/// Owned copies of a glob list
pub fn to_vec(globs: &[&str]) -> Vec<String> {
    globs.iter().map(|g| g.to_string()).collect()
}

/// `**/*.<ext>` for each extra component extension
pub fn component_globs(exts: &[String]) -> Vec<String> {
    exts.iter().map(|ext| format!("**/*.{ext}")).collect()
}

/// Source files under a directory name anywhere in the tree
pub fn src_under(dir: &str) -> String {
    format!("**/{dir}/{GLOB_SRC}")
}

/// `**/<stem>.<src ext>`
pub fn src_named(stem: &str) -> String {
    format!("**/{stem}.{GLOB_SRC_EXT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_globs() {
        assert_eq!(src_under("scripts"), "**/scripts/**/*.?([cm])[jt]s?(x)");
        assert_eq!(src_named("cli"), "**/cli.?([cm])[jt]s?(x)");
        assert_eq!(
            component_globs(&["vue".to_string()]),
            vec!["**/*.vue".to_string()]
        );
    }
}
