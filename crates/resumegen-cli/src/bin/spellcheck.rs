//! resume-spellcheck binary entry point

use anyhow::Result;
use resumegen_cli::spellcheck::run_spellcheck_cli;

fn main() -> Result<()> {
    run_spellcheck_cli()
}
