use anyhow::Result;

fn main() -> Result<()> {
    scorecard_cli::main_entry()
}
