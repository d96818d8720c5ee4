use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cfg = webauthn_shim::config::Config::parse();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(webauthn_shim::run(cfg))
}
