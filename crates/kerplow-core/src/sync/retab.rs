//! Re-indentation of tracked text files

use crate::error::{KerplowError, Result};
use crate::manifest::{PACKAGE_JSON, PACKAGE_LOCK_JSON};
use crate::runtime::Shell;
use std::fmt;
use std::path::{Path, PathBuf};

/// Spaces per leading tab when expanding
const TAB_WIDTH: usize = 4;

/// A line whose indentation changed by more levels than expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationJump {
    pub file: String,
    /// 1-based
    pub line: usize,
}

impl fmt::Display for IndentationJump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - Unexpected indentation jump", self.file, self.line)
    }
}

/// Formatter output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reindented {
    pub text: String,
    pub warnings: Vec<IndentationJump>,
}

/// Rewrites the indentation of one file
pub trait Reindent {
    fn reindent(&self, file_name: &str, text: &str) -> Reindented;
}

/// Normalizes a file to tab indentation.
///
/// Leading tabs are expanded, trailing whitespace trimmed, and the width of
/// one level is taken from the first line indented by two or more spaces.
/// Runs of that width are then folded back into tabs, except in Markdown
/// where leading spaces carry meaning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TabFormatter;

impl Reindent for TabFormatter {
    fn reindent(&self, file_name: &str, text: &str) -> Reindented {
        let mut lines: Vec<String> = text.split('\n').map(expand_line).collect();

        let width = lines
            .iter()
            .map(|line| leading_spaces(line))
            .find(|&spaces| spaces >= 2)
            .unwrap_or(0);

        let warnings = if width > 0 {
            indentation_jumps(&lines, width)
                .into_iter()
                .map(|line| IndentationJump {
                    file: file_name.to_string(),
                    line,
                })
                .collect()
        } else {
            Vec::new()
        };

        if lines.last().is_some_and(|line| !line.is_empty()) {
            lines.push(String::new());
        }

        if width >= 2 && !is_markdown(file_name) {
            for line in &mut lines {
                *line = tabify(line, width);
            }
        }

        Reindented {
            text: lines.join("\n"),
            warnings,
        }
    }
}

/// Expand leading tabs and trim trailing blanks
fn expand_line(line: &str) -> String {
    let rest = line.trim_start_matches('\t');
    let tabs = line.len() - rest.len();
    let mut expanded = " ".repeat(tabs * TAB_WIDTH);
    expanded.push_str(rest);
    expanded.truncate(expanded.trim_end_matches([' ', '\t']).len());
    expanded
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Indentation that counts as a level: two or more whitespace characters
/// before some content
fn indentation(line: &str) -> usize {
    let content = line.trim_start();
    if content.is_empty() {
        return 0;
    }
    let indent = line[..line.len() - content.len()].chars().count();
    if indent >= 2 {
        indent
    } else {
        0
    }
}

/// 1-based line numbers where the indentation level jumps
fn indentation_jumps(lines: &[String], width: usize) -> Vec<usize> {
    let width = width as i64;
    let mut level: i64 = 0;
    let mut jumps = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        // Blank lines inside a block say nothing about its depth
        if line.is_empty() && level != 0 {
            continue;
        }

        let indent = indentation(line) as i64;
        if indent == (level + 1) * width {
            level += 1;
        } else if indent == (level - 1) * width {
            level -= 1;
        } else if indent == (level - 2) * width {
            level = indent / width;
        } else if indent != level * width && indent % width == 0 {
            jumps.push(index + 1);
            level = indent / width;
        }
    }

    jumps
}

fn tabify(line: &str, width: usize) -> String {
    let groups = leading_spaces(line) / width;
    if groups == 0 {
        return line.to_string();
    }
    let mut out = "\t".repeat(groups);
    out.push_str(&line[groups * width..]);
    out
}

fn is_markdown(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Options for a retab run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetabOptions {
    /// Base names never touched
    pub exclude: Vec<String>,
    /// Report without writing
    pub dry_run: bool,
}

impl Default for RetabOptions {
    fn default() -> Self {
        Self {
            exclude: vec![PACKAGE_JSON.to_string(), PACKAGE_LOCK_JSON.to_string()],
            dry_run: false,
        }
    }
}

impl RetabOptions {
    fn is_excluded(&self, file: &Path) -> bool {
        file.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.exclude.iter().any(|excluded| excluded == name))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RetabReport {
    /// Text files that were formatted
    pub checked: Vec<PathBuf>,
    /// Files whose content changed (written unless dry run)
    pub changed: Vec<PathBuf>,
    /// Files skipped because they are not text
    pub binary: Vec<PathBuf>,
    pub warnings: Vec<IndentationJump>,
}

/// Files tracked by git in `repo`, minus excluded base names.
/// Paths are relative to `repo`.
pub fn tracked_files(shell: &Shell, repo: &Path, options: &RetabOptions) -> Result<Vec<PathBuf>> {
    // NUL-separated output is never C-quoted, whatever core.quotepath says
    let listing = shell.run(repo, "git ls-files -z")?;
    Ok(listing
        .split('\0')
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .filter(|file| !options.is_excluded(file))
        .collect())
}

/// Text content of a file, or `None` for binary data
fn as_text(bytes: &[u8]) -> Option<&str> {
    if bytes.contains(&0) {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}

/// Format `files` (relative to `repo`) with `formatter`
pub fn retab_files<F: Reindent>(
    repo: &Path,
    files: &[PathBuf],
    formatter: &F,
    options: &RetabOptions,
) -> Result<RetabReport> {
    let mut report = RetabReport::default();

    for file in files {
        if options.is_excluded(file) {
            continue;
        }

        let path = repo.join(file);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            // Tracked but deleted from the work tree
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(KerplowError::io(format!("Failed to read {}", path.display()), e))
            }
        };

        let Some(text) = as_text(&bytes) else {
            report.binary.push(path);
            continue;
        };

        let formatted = formatter.reindent(&path.display().to_string(), text);
        report.warnings.extend(formatted.warnings);

        if formatted.text != text {
            if !options.dry_run {
                std::fs::write(&path, &formatted.text).map_err(|e| {
                    KerplowError::io(format!("Failed to write {}", path.display()), e)
                })?;
            }
            report.changed.push(path.clone());
        }
        report.checked.push(path);
    }

    Ok(report)
}

/// List the repository's tracked files through `shell` and format them
pub fn retab_repository<F: Reindent>(
    shell: &Shell,
    repo: &Path,
    formatter: &F,
    options: &RetabOptions,
) -> Result<RetabReport> {
    let files = tracked_files(shell, repo, options)?;
    retab_files(repo, &files, formatter, options)
}
