//! Structural validation of gamelist documents.
//!
//! Validation runs before parsing so problems can be reported with line
//! numbers. A document that is not well-formed yields a single issue; the
//! structural checks only run on well-formed input.

use std::fmt;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::schema::{FOLDER, GAME, PATH, PROVIDER, ROOT};

const VALID_ROOT_CHILDREN: &[&str] = &[GAME, FOLDER, PROVIDER];

/// Entry counts of a document that passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub game_count: usize,
    pub folder_count: usize,
}

/// A single problem found in a gamelist document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub message: String,
    /// 1-based line of the offending element, when known.
    pub line: Option<usize>,
    /// Element the issue is about, when it concerns one.
    pub element: Option<String>,
    pub file: Option<String>,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            element: None,
            file: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "[{file}] ")?;
        }
        if let Some(line) = self.line {
            write!(f, "Line {line}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Maps byte offsets to 1-based line numbers.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    fn line_at(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

/// A `<game>` or `<folder>` whose `<path>` child has not been seen yet.
struct OpenEntry {
    kind: &'static str,
    line: usize,
    has_path: bool,
}

impl OpenEntry {
    fn missing_path_issue(&self) -> ValidationIssue {
        ValidationIssue::new(format!(
            "<{}> element missing required <{PATH}> child",
            self.kind
        ))
        .at_line(self.line)
        .with_element(self.kind)
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).to_string()
}

fn not_well_formed(detail: impl fmt::Display, line: usize) -> Vec<ValidationIssue> {
    vec![ValidationIssue::new(format!("XML is not well-formed [{detail}]")).at_line(line)]
}

/// Validate a gamelist document.
///
/// The root must be `<gameList>` and its children may only be `<game>`,
/// `<folder>` and `<provider>`. Every game and folder needs a `<path>` child,
/// which may be empty. All structural issues are collected before returning.
pub fn validate_document(xml: &str) -> Result<ValidationSummary, Vec<ValidationIssue>> {
    let lines = LineIndex::new(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut summary = ValidationSummary::default();
    let mut root_issue: Option<ValidationIssue> = None;
    let mut issues = Vec::new();
    let mut saw_root = false;
    let mut depth = 0usize;
    let mut open: Option<OpenEntry> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                let line = lines.line_at(reader.error_position() as usize);
                return Err(not_well_formed(err, line));
            }
        };
        // Offset of the last byte of the event, which for tags is on the
        // same line as the opening `<` in any reasonably formatted file.
        let line = lines.line_at((reader.buffer_position() as usize).saturating_sub(1));

        let (start, is_empty) = match event {
            Event::Start(ref e) => (e, false),
            Event::Empty(ref e) => (e, true),
            Event::End(_) => {
                if depth == 2 {
                    if let Some(entry) = open.take() {
                        if !entry.has_path {
                            issues.push(entry.missing_path_issue());
                        }
                    }
                }
                depth = depth.saturating_sub(1);
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };
        let name = element_name(start);
        let element_depth = depth + 1;

        match element_depth {
            1 => {
                if saw_root {
                    return Err(not_well_formed(
                        format!("multiple root elements, found second <{name}>"),
                        line,
                    ));
                }
                saw_root = true;
                if name != ROOT {
                    root_issue = Some(
                        ValidationIssue::new(format!(
                            "Root element must be <{ROOT}>, found <{name}>"
                        ))
                        .at_line(line)
                        .with_element(name.as_str()),
                    );
                }
            }
            2 if root_issue.is_none() => {
                if !VALID_ROOT_CHILDREN.contains(&name.as_str()) {
                    issues.push(
                        ValidationIssue::new(format!("Unknown element <{name}> under <{ROOT}>"))
                            .at_line(line)
                            .with_element(name.as_str()),
                    );
                } else if name == GAME || name == FOLDER {
                    let kind = if name == GAME {
                        summary.game_count += 1;
                        GAME
                    } else {
                        summary.folder_count += 1;
                        FOLDER
                    };
                    let entry = OpenEntry {
                        kind,
                        line,
                        has_path: false,
                    };
                    if is_empty {
                        issues.push(entry.missing_path_issue());
                    } else {
                        open = Some(entry);
                    }
                }
            }
            3 => {
                if let Some(ref mut entry) = open {
                    if name == PATH {
                        entry.has_path = true;
                    }
                }
            }
            _ => {}
        }

        if !is_empty {
            depth += 1;
        }
    }

    if depth > 0 {
        let line = lines.line_at(xml.len());
        return Err(not_well_formed("unexpected end of file", line));
    }
    if !saw_root {
        return Err(vec![ValidationIssue::new("XML document has no root element")]);
    }
    if let Some(issue) = root_issue {
        return Err(vec![issue]);
    }
    if !issues.is_empty() {
        return Err(issues);
    }
    Ok(summary)
}

/// Read and validate a gamelist file. Issues are tagged with the file name.
pub fn validate_file(path: &Path) -> Result<ValidationSummary, Vec<ValidationIssue>> {
    let file_label = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let tag = |issues: Vec<ValidationIssue>| {
        issues
            .into_iter()
            .map(|issue| issue.in_file(file_label.as_str()))
            .collect::<Vec<_>>()
    };

    if !path.exists() {
        return Err(tag(vec![ValidationIssue::new(format!(
            "File not found [{}]",
            path.display()
        ))]));
    }
    let xml = std::fs::read_to_string(path).map_err(|err| {
        tag(vec![ValidationIssue::new(format!(
            "Could not read file [{}]: {err}",
            path.display()
        ))])
    })?;

    let result = validate_document(&xml).map_err(tag);
    if let Ok(ref summary) = result {
        log::debug!(
            "Validated {}: {} games, {} folders",
            path.display(),
            summary.game_count,
            summary.folder_count
        );
    }
    result
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
