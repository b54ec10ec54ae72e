fn main() -> anyhow::Result<()> {
    hadr_run::internal_main()
}
