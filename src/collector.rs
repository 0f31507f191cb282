// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IoContext, Result};
use crate::parser::parse_header_file;

const HEADER_SUFFIX: &str = ".h";

/// Lists the headers of a single directory, sorted by filename.
fn list_headers(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut headers = Vec::new();
    for entry in fs::read_dir(dir).at(dir)? {
        let entry = entry.at(dir)?;
        let path = entry.path();
        let is_header = entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.ends_with(HEADER_SUFFIX));
        if is_header && entry.file_type().at(&path)?.is_file() {
            headers.push(path);
        }
    }
    headers.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(headers)
}

/// Collects the headers of the flat directories, in order. The
/// `bootstrap` header of the first directory is returned apart, ahead
/// of the others; a header with that name elsewhere is an ordinary
/// header.
pub fn collect_flat_headers(
    dirs: &[PathBuf],
    bootstrap: &str,
) -> Result<(Option<PathBuf>, Vec<PathBuf>)> {
    let mut headers = Vec::new();
    let mut bootstrap_path = None;
    for (i, dir) in dirs.iter().enumerate() {
        for path in list_headers(dir)? {
            if i == 0 && path.file_name().map_or(false, |name| name == bootstrap) {
                bootstrap_path = Some(path);
            } else {
                headers.push(path);
            }
        }
    }
    Ok((bootstrap_path, headers))
}

/// Collects the composite headers along with every standard include
/// found inside them.
pub fn collect_composite_headers(dir: &Path) -> Result<(Vec<PathBuf>, BTreeSet<String>)> {
    let headers = list_headers(dir)?;
    let mut includes = BTreeSet::new();
    for path in &headers {
        includes.extend(parse_header_file(path)?.includes);
    }
    Ok((headers, includes))
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, contents: &str) -> Result<()> {
        fs::write(dir.join(name), contents)?;
        Ok(())
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn bootstrap_goes_first() -> Result<()> {
        let tmp = TempDir::new()?;
        let datas = tmp.path().join("datas");
        let functions = tmp.path().join("functions");
        fs::create_dir_all(&datas)?;
        fs::create_dir_all(&functions)?;
        touch(&datas, "array.h", "")?;
        touch(&datas, "alpha.h", "")?;
        touch(&datas, "zeta.h", "")?;
        touch(&datas, "notes.txt", "")?;
        fs::create_dir(datas.join("nested.h"))?;
        touch(&functions, "alpha.h", "")?;
        touch(&functions, "in_range.h", "")?;

        let (bootstrap, headers) =
            collect_flat_headers(&[datas.clone(), functions.clone()], "alpha.h")?;
        assert_eq!(bootstrap, Some(datas.join("alpha.h")));
        assert_eq!(
            names(&headers),
            vec!["array.h", "zeta.h", "alpha.h", "in_range.h"]
        );
        assert_eq!(headers[2].parent(), Some(functions.as_path()));
        Ok(())
    }

    #[test]
    fn bootstrap_only_looked_up_in_first_dir() -> Result<()> {
        let tmp = TempDir::new()?;
        let datas = tmp.path().join("datas");
        let functions = tmp.path().join("functions");
        fs::create_dir_all(&datas)?;
        fs::create_dir_all(&functions)?;
        touch(&functions, "alpha.h", "")?;
        let (bootstrap, headers) = collect_flat_headers(&[datas, functions], "alpha.h")?;
        assert_eq!(bootstrap, None);
        assert_eq!(names(&headers), vec!["alpha.h"]);
        Ok(())
    }

    #[test]
    fn missing_bootstrap_leaves_order() -> Result<()> {
        let tmp = TempDir::new()?;
        touch(tmp.path(), "b.h", "")?;
        touch(tmp.path(), "a.h", "")?;
        let (bootstrap, headers) =
            collect_flat_headers(&[tmp.path().to_path_buf()], "alpha.h")?;
        assert_eq!(bootstrap, None);
        assert_eq!(names(&headers), vec!["a.h", "b.h"]);
        Ok(())
    }

    #[test]
    fn missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(collect_flat_headers(&[missing], "alpha.h").is_err());
    }

    #[test]
    fn composite_includes_are_unioned() -> Result<()> {
        let tmp = TempDir::new()?;
        touch(tmp.path(), "version.h", "#include <vector>\ncompositecode();\n")?;
        touch(tmp.path(), "matrix.h", "// lic\n#include <vector>\n#include <array>\n")?;
        let (headers, includes) = collect_composite_headers(tmp.path())?;
        assert_eq!(names(&headers), vec!["matrix.h", "version.h"]);
        assert_eq!(
            includes.into_iter().collect::<Vec<_>>(),
            vec!["#include <array>", "#include <vector>"]
        );
        Ok(())
    }
}
