use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use goldenfile::Mint;

use headerbundler::{Amalgamator, Layout};

const INPUT_DIR: &str = "tests/testdata/input";
const OUTPUT_DIR: &str = "tests/testdata/output";

#[test]
fn kaizen() -> Result<()> {
    let mut mint = Mint::new(OUTPUT_DIR);
    golden(&mut mint, "kaizen")
}

fn golden(mint: &mut Mint, testname: &str) -> Result<()> {
    let output_name = Path::new(testname).with_extension("h");
    let input_root = {
        let mut p = PathBuf::from(INPUT_DIR);
        p.push(testname);
        p
    };
    let mut golden = mint.new_goldenfile(&output_name)?;
    let mut amalgamator = Amalgamator::new(Layout::under(&input_root), &output_name);
    amalgamator.generated_on(
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
    );
    amalgamator.run_fd(&mut golden)?;
    Ok(())
}
