use xiti_tag::cli;

pub fn main() -> anyhow::Result<()> {
    cli::process_command()
}
