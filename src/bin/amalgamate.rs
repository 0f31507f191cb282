// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use headerbundler::{Amalgamator, Layout};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// Directory holding zen/ and LICENSE.txt.
    #[clap(long, default_value = ".")]
    pub root: PathBuf,
    /// The output file, kaizen.h under the root by default.
    #[clap(long)]
    pub output: Option<PathBuf>,
    /// The license text, LICENSE.txt under the root by default.
    #[clap(long)]
    pub license: Option<PathBuf>,
    /// Namespace whose wrappers are collapsed.
    #[clap(long, default_value = "zen")]
    pub namespace: String,
    /// Header emitted verbatim before everything else.
    #[clap(long, default_value = "alpha.h")]
    pub bootstrap: String,
    /// Write the output even if the bootstrap header is missing.
    #[clap(long)]
    pub allow_missing_bootstrap: bool,
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("headerbundler=info"),
    )
    .init();

    let cli = Cli::parse();
    let mut layout = Layout::under(&cli.root);
    if let Some(license) = cli.license {
        layout.license = license;
    }
    let output = cli.output.unwrap_or_else(|| cli.root.join("kaizen.h"));

    let mut amalgamator = Amalgamator::new(layout, &output);
    amalgamator.namespace(&cli.namespace);
    amalgamator.bootstrap(&cli.bootstrap);
    amalgamator.require_bootstrap(!cli.allow_missing_bootstrap);
    amalgamator.run()?;
    Ok(())
}
