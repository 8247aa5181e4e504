//! Diff command implementations
//!
//! Both commands print the same grouped changelog: one section per
//! category, one group per component, and per change the field path with
//! the old value in red and the new value in green.

use std::fmt::Write as _;
use std::path::Path;

use colored::Colorize;
use serde_json::{Value, json};
use similar::{ChangeTag, TextDiff};

use sumo_core::{ChangeKind, ChangeSet, ComponentSet, decompose, parse_artifact};
use sumo_fs::{NormalizedPath, io};

use crate::context::Context;
use crate::error::Result;

/// Diff two overlays of the configured chain.
pub fn run_diff_overlays(ctx: &Context, from: &str, to: &str, json: bool) -> Result<()> {
    let application = ctx.load_application()?;
    let changes = application.diff_overlays(from, to)?;
    print_changes(&changes, json)
}

/// Diff two build artifacts through their decomposed components.
pub fn run_diff_builds(from: &Path, to: &Path, json: bool) -> Result<()> {
    let changes = ChangeSet::compute(&load_build(from)?, &load_build(to)?)?;
    print_changes(&changes, json)
}

fn load_build(path: &Path) -> Result<ComponentSet> {
    let path = NormalizedPath::new(path);
    let content = io::read_text(&path)?;
    Ok(decompose(parse_artifact(&content, &path)?))
}

fn print_changes(changes: &ChangeSet, json: bool) -> Result<()> {
    if json {
        let output = json!({
            "count": changes.len(),
            "groups": changes.groups(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_changes(changes)?);
    }
    Ok(())
}

/// Human-readable changelog.
pub fn render_changes(changes: &ChangeSet) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} changes", changes.len());
    let _ = writeln!(out);

    let mut current_category = None;
    for group in changes.groups() {
        if current_category != Some(group.category) {
            current_category = Some(group.category);
            let _ = writeln!(out, "=========== {} ============", group.category.category());
        }

        let _ = writeln!(
            out,
            "In {} {} : {} change(s)",
            group.category.category(),
            group.key.bold(),
            group.changes.len()
        );

        for change in &group.changes {
            if let Some(path) = change.field_path() {
                let _ = writeln!(out, "At {}", path.cyan());
            }
            match (change.kind, &change.from, &change.to) {
                (ChangeKind::Update, Some(from), Some(to)) => write_update(&mut out, from, to)?,
                (_, Some(from), _) if change.kind == ChangeKind::Delete => {
                    write_value(&mut out, from, '-')?
                }
                (_, _, Some(to)) => write_value(&mut out, to, '+')?,
                _ => {}
            }
            let _ = writeln!(out);
        }
    }

    Ok(out)
}

fn write_update(out: &mut String, from: &Value, to: &Value) -> Result<()> {
    match (from, to) {
        (Value::String(old), Value::String(new)) if old.contains('\n') || new.contains('\n') => {
            for change in TextDiff::from_lines(old.as_str(), new.as_str()).iter_all_changes() {
                let line = change.value().trim_end_matches('\n');
                match change.tag() {
                    ChangeTag::Delete => write_line(out, line, '-'),
                    ChangeTag::Insert => write_line(out, line, '+'),
                    ChangeTag::Equal => {
                        let _ = writeln!(out, "  {line}");
                    }
                }
            }
            Ok(())
        }
        _ => {
            write_value(out, from, '-')?;
            write_value(out, to, '+')
        }
    }
}

fn write_value(out: &mut String, value: &Value, sign: char) -> Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    for line in yaml.trim_end_matches('\n').lines() {
        write_line(out, line, sign);
    }
    Ok(())
}

fn write_line(out: &mut String, line: &str, sign: char) {
    let text = format!("{sign} {line}");
    let _ = match sign {
        '-' => writeln!(out, "{}", text.red()),
        _ => writeln!(out, "{}", text.green()),
    };
}
