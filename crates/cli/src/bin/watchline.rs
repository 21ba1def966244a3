//! Watchline CLI binary entrypoint.

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    watchline_cli::app::run().context("watchline failed")
}
