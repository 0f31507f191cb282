// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{IoContext, Result};

lazy_static! {
    static ref INTERNAL_INCLUDE_RE: Regex = Regex::new(r#"^#include\s+"(.*)""#).unwrap();
    static ref SYSTEM_INCLUDE_RE: Regex = Regex::new(r"^#include\s+<(.*)>").unwrap();
}

const COMMENT_PREFIX: &str = "//";
const PRAGMA_ONCE: &str = "#pragma once";

/// The three channels a header is split into, minus the license which
/// is dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// `#include <...>` lines, trimmed.
    pub includes: BTreeSet<String>,
    /// Everything else, in order, each line terminated by `\n`.
    pub code: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    License,
    Code,
}

/// Splits `text` into lines keeping their terminators; a last line
/// without one gets a `\n` so that concatenated files stay separate.
fn lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_inclusive('\n').map(|line| {
        if line.ends_with('\n') {
            line.to_string()
        } else {
            format!("{}\n", line)
        }
    })
}

/// Separates license, include directives and code of a header.
///
/// Leading `//` lines are license text. The first line that is not a
/// comment switches to code and is then handled like any other line,
/// so a blank line after the license is kept.
pub fn parse_header(text: &str) -> ParsedHeader {
    let mut parsed = ParsedHeader::default();
    let mut state = State::License;
    for line in lines(text) {
        if state == State::License {
            if line.trim().starts_with(COMMENT_PREFIX) {
                continue;
            }
            state = State::Code;
        }
        if line.contains(PRAGMA_ONCE) || INTERNAL_INCLUDE_RE.is_match(&line) {
            continue;
        }
        if SYSTEM_INCLUDE_RE.is_match(&line) {
            parsed.includes.insert(line.trim().to_string());
        } else {
            parsed.code.push(line);
        }
    }
    parsed
}

pub fn parse_header_file(path: &Path) -> Result<ParsedHeader> {
    let text = fs::read_to_string(path).at(path)?;
    let parsed = parse_header(&text);
    debug!(
        "parsed {}: {} includes, {} code lines",
        path.display(),
        parsed.includes.len(),
        parsed.code.len()
    );
    Ok(parsed)
}
