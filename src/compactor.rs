// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

/// Keeps the first `namespace <ns> {` and the last `} // namespace <ns>`
/// and drops every other occurrence of either marker.
///
/// Markers are matched as literal substrings. Nesting is not tracked:
/// a namespace reopened inside itself collapses like any other.
pub fn compact_namespace(code: Vec<String>, namespace: &str) -> Vec<String> {
    let open = format!("namespace {} {{", namespace);
    let close = format!("}} // namespace {}", namespace);

    let last_close = code.iter().rposition(|line| line.contains(&close));
    let mut open_seen = false;

    code.into_iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            if line.contains(&open) {
                if open_seen {
                    return None;
                }
                open_seen = true;
            } else if line.contains(&close) && Some(idx) != last_close {
                return None;
            }
            Some(line)
        })
        .collect()
}

/// Collapses runs of blank lines into a single blank line.
pub fn deflate(code: Vec<String>) -> Vec<String> {
    let mut prev_blank = false;
    code.into_iter()
        .filter(|line| {
            let blank = is_blank(line);
            let keep = !(blank && prev_blank);
            prev_blank = blank;
            keep
        })
        .collect()
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
