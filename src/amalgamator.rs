// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{info, warn};

use crate::collector::{collect_composite_headers, collect_flat_headers};
use crate::compactor::{compact_namespace, deflate, is_blank};
use crate::error::{AmalgamateError, IoContext, Result};
use crate::license::read_license;
use crate::parser::parse_header_file;

const BOOTSTRAP_FILENAME: &str = "alpha.h";
const NAMESPACE: &str = "zen";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Where the headers and the license live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directories whose headers are parsed and merged, in order. The
    /// bootstrap header is looked up in the first one.
    pub flat_dirs: Vec<PathBuf>,
    /// Directory whose headers' includes are kept out of the top level.
    pub composite_dir: PathBuf,
    pub license: PathBuf,
}

impl Layout {
    /// The `zen/` layout: `datas` and `functions` flat, `composites`
    /// composite, `LICENSE.txt` beside them.
    pub fn under(root: &Path) -> Layout {
        Layout {
            flat_dirs: vec![root.join("zen/datas"), root.join("zen/functions")],
            composite_dir: root.join("zen/composites"),
            license: root.join("LICENSE.txt"),
        }
    }
}

/// Everything read from the layout, ready to be written out.
#[derive(Debug, Clone)]
struct Amalgam {
    bootstrap: Option<PathBuf>,
    headers: Vec<PathBuf>,
    license: Vec<String>,
    includes: BTreeSet<String>,
    code: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Amalgamator<'a> {
    layout: Layout,
    output_filename: &'a Path,
    bootstrap: String,
    namespace: String,
    require_bootstrap: bool,
    generated_on: Option<NaiveDateTime>,
}

impl<'a> Amalgamator<'a> {
    pub fn new(layout: Layout, output_filename: &'a Path) -> Amalgamator<'a> {
        Amalgamator {
            layout,
            output_filename,
            bootstrap: String::from(BOOTSTRAP_FILENAME),
            namespace: String::from(NAMESPACE),
            require_bootstrap: true,
            generated_on: None,
        }
    }

    pub fn bootstrap(&mut self, filename: &str) {
        self.bootstrap = String::from(filename);
    }

    pub fn namespace(&mut self, name: &str) {
        self.namespace = String::from(name);
    }

    /// When disabled, a missing bootstrap header is reported and the
    /// output is written without it.
    pub fn require_bootstrap(&mut self, enable: bool) {
        self.require_bootstrap = enable;
    }

    /// Pins the timestamp of the banner instead of using the local time.
    pub fn generated_on(&mut self, timestamp: NaiveDateTime) {
        self.generated_on = Some(timestamp);
    }

    /// Writes the amalgamated header to the output file and makes it
    /// read-only. A previous output is replaced.
    pub fn run(&self) -> Result<()> {
        let amalgam = self.collect()?;
        let bootstrap = self.bootstrap_contents(&amalgam)?;

        let path = self.output_filename;
        if path.exists() {
            warn!("replacing previous output {}", path.display());
            fs::remove_file(path).at(path)?;
        }
        let mut o = BufWriter::new(File::create(path).at(path)?);
        self.write(&mut o, amalgam, bootstrap.as_deref()).at(path)?;
        o.into_inner()
            .map_err(|e| e.into_error())
            .and_then(|fd| fd.sync_all())
            .at(path)?;

        let mut perms = fs::metadata(path).at(path)?.permissions();
        perms.set_readonly(true);
        fs::set_permissions(path, perms).at(path)?;
        info!("wrote {}", path.display());
        Ok(())
    }

    /// Writes the amalgamated header to `o`, leaving the output file alone.
    pub fn run_fd<W: Write>(&self, o: &mut W) -> Result<()> {
        let amalgam = self.collect()?;
        let bootstrap = self.bootstrap_contents(&amalgam)?;
        self.write(o, amalgam, bootstrap.as_deref())
            .at(self.output_filename)
    }

    /// Reads every header and the license. Includes found in composite
    /// headers are removed from the global set. The bootstrap header
    /// contributes its includes but not its code, which is written raw.
    fn collect(&self) -> Result<Amalgam> {
        let (bootstrap, headers) =
            collect_flat_headers(&self.layout.flat_dirs, &self.bootstrap)?;
        let (composites, composite_includes) =
            collect_composite_headers(&self.layout.composite_dir)?;
        info!(
            "collected {} headers and {} composite headers",
            headers.len(),
            composites.len()
        );

        let mut includes = BTreeSet::new();
        let mut code = Vec::new();
        if let Some(path) = &bootstrap {
            includes.extend(parse_header_file(path)?.includes);
        }
        for path in &headers {
            let parsed = parse_header_file(path)?;
            includes.extend(parsed.includes);
            code.extend(parsed.code);
        }
        for path in &composites {
            code.extend(parse_header_file(path)?.code);
        }
        let includes = includes
            .difference(&composite_includes)
            .cloned()
            .collect();

        Ok(Amalgam {
            bootstrap,
            headers,
            license: read_license(&self.layout.license)?,
            includes,
            code,
        })
    }

    /// Raw contents of the bootstrap header.
    fn bootstrap_contents(&self, amalgam: &Amalgam) -> Result<Option<String>> {
        match &amalgam.bootstrap {
            Some(path) => Ok(Some(fs::read_to_string(path).at(path)?)),
            None => {
                let first = amalgam.headers.first().map_or_else(
                    || String::from("<none>"),
                    |p| p.display().to_string(),
                );
                if self.require_bootstrap {
                    return Err(AmalgamateError::BootstrapMissing {
                        name: self.bootstrap.clone(),
                        first,
                    });
                }
                println!(
                    "FATAL ERROR: HEADER {} NOT FOUND, IT IS NEEDED AS AN INTERNAL DEPENDENCY",
                    self.bootstrap
                );
                warn!("continuing without {}", self.bootstrap);
                Ok(None)
            }
        }
    }

    fn write<W: Write>(
        &self,
        o: &mut W,
        amalgam: Amalgam,
        bootstrap: Option<&str>,
    ) -> std::io::Result<()> {
        let code = compact_namespace(amalgam.code, &self.namespace);
        let code = deflate(code);

        let timestamp = self
            .generated_on
            .unwrap_or_else(|| Local::now().naive_local());
        writeln!(o, "// FILE GENERATED ON: {}", timestamp.format(TIMESTAMP_FORMAT))?;
        writeln!(o, "//")?;
        for line in &amalgam.license {
            write!(o, "{}", line)?;
        }
        write!(o, "\n#pragma once\n\n")?;
        writeln!(o, "// Since the order of these #includes doesn't matter,")?;
        writeln!(o, "// they're sorted in descending length for aesthetics")?;

        if let Some(contents) = bootstrap {
            write!(o, "{}", contents)?;
            writeln!(o)?;
        }

        // BTreeSet order breaks length ties lexicographically.
        let mut includes: Vec<&String> = amalgam.includes.iter().collect();
        includes.sort_by_key(|d| Reverse(d.chars().count()));
        for include in includes {
            writeln!(o, "{}", include)?;
        }

        let leading = code.iter().take_while(|line| is_blank(line)).count();
        writeln!(o)?;
        for line in &code[leading..] {
            write!(o, "{}", line)?;
        }
        Ok(())
    }
}
