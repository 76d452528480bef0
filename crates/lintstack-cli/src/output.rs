//! Output formatting

use colored::*;
use lintstack_core::{ComposedConfig, DefaultPolicy, DomainSpec, Fragment, Resolution};

/// One block per fragment, followed by a summary
pub fn print_human(composed: &ComposedConfig) {
    for (position, fragment) in composed.fragments().iter().enumerate() {
        print_fragment(position, fragment);
    }

    println!("\n{}", "Summary:".bold());
    println!("  Fragments: {}", composed.len());
    let rules: usize = composed
        .fragments()
        .iter()
        .map(|f| f.rule_settings.len())
        .sum();
    println!("  Rule settings: {rules}");
    if let Some(renaming) = composed.renaming() {
        let aliases: Vec<String> = renaming
            .iter()
            .map(|(from, to)| format!("{from} -> {to}"))
            .collect();
        println!("  Plugin aliases: {}", aliases.join(", ").dimmed());
    }
    if !composed.fix_disabled_rules().is_empty() {
        println!(
            "  Autofix disabled: {}",
            composed.fix_disabled_rules().join(", ").yellow()
        );
    }
}

fn print_fragment(position: usize, fragment: &Fragment) {
    let name = match fragment.name() {
        Some(name) => name.bold().to_string(),
        None => "(unnamed)".dimmed().to_string(),
    };
    println!("{:>3}  {}", position.to_string().dimmed(), name);

    if let Some(files) = &fragment.file_patterns {
        println!("       files: {}", files.join(", "));
    }
    if let Some(ignores) = &fragment.ignore_patterns {
        println!("       ignores: {} patterns", ignores.len());
    }
    if !fragment.plugin_bindings.is_empty() {
        let plugins: Vec<&str> = fragment.plugin_bindings.keys().map(String::as_str).collect();
        println!("       plugins: {}", plugins.join(", ").cyan());
    }
    if !fragment.rule_settings.is_empty() {
        let (off, on): (Vec<_>, Vec<_>) = fragment.rule_settings.values().partition(|s| s.is_off());
        println!(
            "       rules: {} on, {} off",
            on.len().to_string().green(),
            off.len().to_string().red()
        );
    }
}

pub fn print_json(composed: &ComposedConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(composed)?);
    Ok(())
}

pub fn print_names(composed: &ComposedConfig) {
    for (position, fragment) in composed.fragments().iter().enumerate() {
        match fragment.name() {
            Some(name) => println!("{name}"),
            None => println!("{}", fragment.label(position)),
        }
    }
}

fn describe_policy(policy: &DefaultPolicy) -> String {
    match policy {
        DefaultPolicy::Enabled => "enabled by default".to_string(),
        DefaultPolicy::Disabled => "disabled by default".to_string(),
        DefaultPolicy::Always => "always on".to_string(),
        DefaultPolicy::DetectAny(packages) => format!("detected from {}", packages.join(", ")),
    }
}

/// One line per domain, plus its options when `detailed`
pub fn print_resolution(
    spec: &DomainSpec,
    resolution: &Resolution,
    detailed: bool,
) -> anyhow::Result<()> {
    let status = match resolution {
        Resolution::Included(_) => "included".green(),
        Resolution::Excluded => "excluded".red(),
    };
    println!(
        "{:<12} {:<9} {}",
        spec.key,
        status,
        describe_policy(&spec.policy).dimmed()
    );

    if detailed && let Resolution::Included(options) = resolution {
        if options.values().is_empty() {
            println!("  options: (defaults)");
        } else {
            println!("  options:");
            let rendered = serde_json::to_string_pretty(options.values())?;
            for line in rendered.lines() {
                println!("    {line}");
            }
        }
    }
    Ok(())
}
