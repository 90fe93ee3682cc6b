use anyhow::Result;

fn main() -> Result<()> {
    lens_cli::main_entry()
}
