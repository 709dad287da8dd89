//! Include sorting pass.
//!
//! A block is a run of consecutive `#include` lines. Within a block, the main header (the one
//! whose stem matches the file being formatted) goes first and the rest are ordered by their
//! directive text. Each replacement covers one line's text between its indentation and its
//! trailing whitespace, so it never overlaps the whitespace pass.

use crate::lines::{SourceLine, source_lines};
use refmt_core::Replacement;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#\s*include\s*[<"]([^>"]+)[>"]"#).expect("include pattern is valid")
});

struct IncludeLine<'a> {
    line: &'a SourceLine,
    directive: String,
    path: String,
}

impl IncludeLine<'_> {
    fn sort_key(&self, main_stem: Option<&str>) -> (bool, &str) {
        let is_main = main_stem.is_some_and(|stem| file_stem(&self.path) == Some(stem));
        (!is_main, self.directive.as_str())
    }
}

pub(crate) fn sort_includes(buffer: &str, filename_hint: Option<&str>) -> Vec<Replacement> {
    let lines = source_lines(buffer);
    let main_stem = filename_hint.and_then(file_stem);

    let mut replacements = Vec::new();
    let mut block: Vec<IncludeLine<'_>> = Vec::new();
    for line in &lines {
        match include_line(line) {
            Some(include) => block.push(include),
            None => sort_block(&mut block, main_stem, &mut replacements),
        }
    }
    sort_block(&mut block, main_stem, &mut replacements);

    replacements
}

fn include_line(line: &SourceLine) -> Option<IncludeLine<'_>> {
    let directive = line.trimmed();
    let path = INCLUDE.captures(&directive)?.get(1)?.as_str().to_string();
    Some(IncludeLine {
        line,
        directive,
        path,
    })
}

/// Emit replacements for `block` (if out of order) and clear it.
fn sort_block(
    block: &mut Vec<IncludeLine<'_>>,
    main_stem: Option<&str>,
    replacements: &mut Vec<Replacement>,
) {
    if block.len() > 1 {
        let emitted = replacements.len();
        let mut sorted: Vec<&IncludeLine<'_>> = block.iter().collect();
        sorted.sort_by(|a, b| a.sort_key(main_stem).cmp(&b.sort_key(main_stem)));

        for (original, wanted) in block.iter().zip(sorted) {
            if original.directive == wanted.directive {
                continue;
            }
            let offset = original.line.start + original.line.leading_ws();
            let length = original.directive.chars().count();
            replacements.push(Replacement::new(offset, length, wanted.directive.clone()));
        }

        if replacements.len() > emitted {
            tracing::trace!(lines = block.len(), "include block reordered");
        }
    }
    block.clear();
}

fn file_stem(path: &str) -> Option<&str> {
    Path::new(path).file_stem().and_then(|stem| stem.to_str())
}
