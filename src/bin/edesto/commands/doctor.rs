//! `edesto doctor` command

use anyhow::Result;

use edesto::ops::{doctor, format_report, SystemProbe};
use edesto::ToolchainRegistry;

pub fn execute(verbose: bool) -> Result<()> {
    let registry = ToolchainRegistry::new();
    let report = doctor(&registry, &SystemProbe);

    // A missing toolchain is expected on most machines; the report is
    // informational and always exits successfully.
    print!("{}", format_report(&report, verbose));

    Ok(())
}
