// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::fs;
use std::path::Path;

use crate::error::{IoContext, Result};

const COMMENT_TOKEN: &str = "// ";

/// Turns license text into comment lines, prefixing `// ` where it is
/// not already there. Line terminators are kept as they are.
pub fn license_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n')
        .map(|line| {
            if line.starts_with(COMMENT_TOKEN) {
                line.to_string()
            } else {
                format!("{}{}", COMMENT_TOKEN, line)
            }
        })
        .collect()
}

pub fn read_license(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).at(path)?;
    Ok(license_lines(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_plain_lines() {
        assert_eq!(
            license_lines("MIT License\n\nCopyright\n"),
            vec!["// MIT License\n", "// \n", "// Copyright\n"]
        );
    }

    #[test]
    fn keeps_commented_lines() {
        assert_eq!(
            license_lines("// already\n//tight\n"),
            vec!["// already\n", "// //tight\n"]
        );
    }

    #[test]
    fn last_line_unterminated() {
        assert_eq!(license_lines("a\nb"), vec!["// a\n", "// b"]);
    }
}
