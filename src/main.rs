fn main() -> anyhow::Result<()> {
    routeway::cli::run_cli()
}
