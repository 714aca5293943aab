//! `resume-spellcheck`: proofread every string value of a resume in an editor
//!
//! Values matching `: "<value>"` are written one per line to a temporary
//! file and opened with `$EDITOR`. Each edited line then replaces the value
//! at the same position.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::Regex;
use tempfile::NamedTempFile;

#[derive(Debug, Parser)]
#[command(name = "resume-spellcheck")]
#[command(author, version, about = "Edit the string values of a resume file", long_about = None)]
pub struct SpellcheckCli {
    /// File to check
    pub filename: PathBuf,

    /// Extra arguments passed to the editor
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub editor_args: Vec<String>,
}

fn value_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#": "([^"]*?)""#).unwrap())
}

/// Every `: "<value>"` value in document order
pub fn extract_values(content: &str) -> Vec<&str> {
    value_pattern()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Replace the n-th value with the n-th line of `replacements`, trimmed
///
/// Values past the last line become empty strings.
pub fn substitute_values(content: &str, replacements: &str) -> String {
    let mut lines = replacements.lines();
    value_pattern()
        .replace_all(content, |_: &regex::Captures| {
            format!(": \"{}\"", lines.next().unwrap_or("").trim())
        })
        .into_owned()
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

/// Run the interactive edit cycle for one file
pub fn run_spellcheck(filename: &Path, editor_args: &[String]) -> Result<()> {
    let content = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read {}", filename.display()))?;

    let mut tmp = NamedTempFile::new().context("Failed to create temporary file")?;
    for value in extract_values(&content) {
        println!("{}", value);
        writeln!(tmp, "{}", value)?;
    }
    tmp.flush()?;

    println!("Tmp file : {}", tmp.path().display());
    prompt("Press Enter to edit file...")?;

    let editor = std::env::var("EDITOR").context("EDITOR is not set")?;
    let status = Command::new(&editor)
        .arg(tmp.path())
        .args(editor_args)
        .status()
        .with_context(|| format!("Failed to run editor {}", editor))?;
    if !status.success() {
        bail!("Editor {} exited with {}", editor, status);
    }

    let answer = prompt(&format!("Write to file [{}]: ", filename.display()))?;
    let output = if answer.is_empty() {
        filename.to_path_buf()
    } else {
        PathBuf::from(answer)
    };

    // Editors may replace the file rather than write through our handle
    let edited = fs::read_to_string(tmp.path()).context("Failed to read edited values")?;
    fs::write(&output, substitute_values(&content, &edited))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

/// Entry point of `resume-spellcheck`
///
/// A missing file argument prints usage and exits with status 1.
pub fn run_spellcheck_cli() -> Result<()> {
    let cli = match SpellcheckCli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    run_spellcheck(&cli.filename, &cli.editor_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = r#"{
  "basics": {
    "name": "Jane Doe",
    "label": "Enginer",
    "profiles": []
  },
  "work": [{ "summary": "" }]
}"#;

    #[test]
    fn test_extract_values_in_order() {
        assert_eq!(extract_values(RESUME), vec!["Jane Doe", "Enginer", ""]);
    }

    #[test]
    fn test_keys_are_not_values() {
        // `"basics": {` has no quoted value after the colon
        assert!(!extract_values(RESUME).contains(&"basics"));
        assert!(extract_values(r#"{"n": 1, "ok": true}"#).is_empty());
    }

    #[test]
    fn test_substitute_in_order() {
        let fixed = substitute_values(RESUME, "Jane Doe\n  Engineer \nBuilt things\n");
        assert!(fixed.contains(r#""label": "Engineer","#));
        assert!(fixed.contains(r#""summary": "Built things""#));
        assert!(fixed.contains(r#""profiles": []"#));
    }

    #[test]
    fn test_missing_lines_become_empty() {
        let fixed = substitute_values(RESUME, "Jane Doe\n");
        assert_eq!(extract_values(&fixed), vec!["Jane Doe", "", ""]);
    }

    #[test]
    fn test_unchanged_lines_round_trip() {
        let values = extract_values(RESUME).join("\n");
        assert_eq!(substitute_values(RESUME, &values), RESUME);
    }

    #[test]
    fn test_cli_collects_editor_args() {
        let cli = SpellcheckCli::try_parse_from([
            "resume-spellcheck",
            "resume-en.json",
            "-c",
            "set spell",
        ])
        .unwrap();
        assert_eq!(cli.filename, PathBuf::from("resume-en.json"));
        assert_eq!(cli.editor_args, vec!["-c", "set spell"]);
    }

    #[test]
    fn test_cli_requires_filename() {
        assert!(SpellcheckCli::try_parse_from(["resume-spellcheck"]).is_err());
    }
}
