//! Whitespace reformatting pass.
//!
//! Every replacement produced here covers a whitespace gap (indentation, trailing blanks, the
//! gaps around an assignment operator), a whole surplus blank line, or the missing final
//! newline. Non-whitespace text is never rewritten.

use crate::line_ending::LineEnding;
use crate::lines::{SourceLine, is_blank, source_lines};
use refmt_core::{Replacement, StyleConfig};
use std::collections::BTreeMap;
use std::ops::Range;

pub(crate) fn reformat(style: &StyleConfig, buffer: &str) -> Vec<Replacement> {
    let lines = source_lines(buffer);

    // Keyed by offset so that a gap shared by two operators is only rewritten once.
    let mut edits: BTreeMap<usize, Replacement> = BTreeMap::new();
    let mut deletions: Vec<Replacement> = Vec::new();
    let mut blank_run = 0;
    let mut in_block_comment = false;
    let mut last_line_deleted = false;

    for line in &lines {
        last_line_deleted = false;

        if line.is_blank() {
            blank_run += 1;
            if blank_run > style.max_empty_lines_to_keep {
                delete_line(&mut deletions, line);
                last_line_deleted = true;
                continue;
            }
        } else {
            blank_run = 0;
            indentation(style, line, &mut edits);
            if style.space_before_assignment_operators {
                assignment_gaps(line, &mut in_block_comment, &mut edits);
            }
        }

        let trailing = line.trailing_ws_start();
        if trailing < line.content_len {
            let offset = line.start + trailing;
            edits
                .entry(offset)
                .or_insert_with(|| Replacement::new(offset, line.content_len - trailing, ""));
        }
    }

    if style.insert_newline_at_eof
        && !last_line_deleted
        && let Some(last) = lines.last()
        && !last.has_terminator()
    {
        let offset = last.start + last.len();
        let newline = LineEnding::detect_in_text(buffer).as_str();
        edits.insert(offset, Replacement::insertion(offset, newline));
    }

    let mut replacements: Vec<Replacement> = edits.into_values().collect();
    replacements.extend(deletions);
    replacements
}

/// Remove a whole line, extending the previous deletion when they touch.
fn delete_line(deletions: &mut Vec<Replacement>, line: &SourceLine) {
    if let Some(previous) = deletions.last_mut()
        && previous.end() == line.start
    {
        previous.length += line.len();
        return;
    }
    deletions.push(Replacement::new(line.start, line.len(), ""));
}

fn indentation(style: &StyleConfig, line: &SourceLine, edits: &mut BTreeMap<usize, Replacement>) {
    let lead = line.leading_ws();
    if lead == 0 || style.indent_width == 0 {
        return;
    }

    let current = &line.chars[..lead];
    let width: usize = current
        .iter()
        .map(|c| if *c == '\t' { style.indent_width } else { 1 })
        .sum();
    let desired = if style.use_tab {
        let mut indent = "\t".repeat(width / style.indent_width);
        indent.push_str(&" ".repeat(width % style.indent_width));
        indent
    } else {
        " ".repeat(width)
    };

    if !desired.chars().eq(current.iter().copied()) {
        edits.insert(line.start, Replacement::new(line.start, lead, desired));
    }
}

/// Give every assignment operator on the line exactly one space on each side.
///
/// Preprocessor lines, comments, and string/char literals are left alone. An operator that
/// starts the line keeps its indentation; one that ends it leaves the trailing gap to the
/// trailing-whitespace rule.
fn assignment_gaps(
    line: &SourceLine,
    in_block_comment: &mut bool,
    edits: &mut BTreeMap<usize, Replacement>,
) {
    let lead = line.leading_ws();
    let end = line.trailing_ws_start();
    let code = &line.chars[..end];
    let operators = assignment_operators(code, lead, in_block_comment);
    if code.get(lead) == Some(&'#') {
        return;
    }

    for operator in operators {
        let mut before = operator.start;
        while before > lead && is_blank(code[before - 1]) {
            before -= 1;
        }
        if before > lead && !is_single_space(&code[before..operator.start]) {
            let offset = line.start + before;
            edits
                .entry(offset)
                .or_insert_with(|| Replacement::new(offset, operator.start - before, " "));
        }

        let mut after = operator.end;
        while after < end && is_blank(code[after]) {
            after += 1;
        }
        if after < end && !is_single_space(&code[operator.end..after]) {
            let offset = line.start + operator.end;
            edits
                .entry(offset)
                .or_insert_with(|| Replacement::new(offset, after - operator.end, " "));
        }
    }
}

fn is_single_space(gap: &[char]) -> bool {
    gap == [' ']
}

/// Char ranges of the assignment operators in `code[from..]`.
fn assignment_operators(code: &[char], from: usize, in_block_comment: &mut bool) -> Vec<Range<usize>> {
    let mut operators = Vec::new();
    let mut i = from;

    while i < code.len() {
        let next = code.get(i + 1).copied();
        if *in_block_comment {
            if code[i] == '*' && next == Some('/') {
                *in_block_comment = false;
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }

        match code[i] {
            '/' if next == Some('/') => break,
            '/' if next == Some('*') => {
                *in_block_comment = true;
                i += 2;
            }
            quote @ ('"' | '\'') => i = skip_literal(code, i, quote),
            '=' if next == Some('=') => i += 2,
            '=' => {
                if let Some(start) = operator_start(code, from, i) {
                    operators.push(start..i + 1);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    operators
}

/// Start of the operator ending in the `=` at `eq`, or `None` for comparisons.
fn operator_start(code: &[char], from: usize, eq: usize) -> Option<usize> {
    if eq == from {
        return Some(eq);
    }

    match code[eq - 1] {
        '=' | '!' => None,
        shift @ ('<' | '>') => (eq >= from + 2 && code[eq - 2] == shift).then(|| eq - 2),
        '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' => Some(eq - 1),
        _ => Some(eq),
    }
}

/// Index just past the literal opened at `open` (or the end of the line if unterminated).
fn skip_literal(code: &[char], open: usize, quote: char) -> usize {
    let mut i = open + 1;
    while i < code.len() {
        match code[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    code.len()
}
