use clap::{ArgMatches, Command};
use drsa::cmd::{self, Cmd, DrsaConfig, GenerateCmd, KeyPairCmd, PerfCmd, RsaGenCmd};
use log::LevelFilter;
use std::path::PathBuf;

fn run(name: &str, m: &ArgMatches) -> anyhow::Result<()> {
    let config = DrsaConfig::init(m.get_one::<PathBuf>("config").map(|f| f.as_path()))?;
    let params = cmd::params(config, m)?;
    log::debug!(
        "seed size: {}, hash: {}, reseed: {}, max retries: {:?}",
        params.seed_size(),
        params.hash(),
        params.reseed(),
        params.max_retries()
    );

    match name {
        GenerateCmd::NAME => GenerateCmd::new(config, params).run(m),
        RsaGenCmd::NAME => RsaGenCmd::new(config, params).run(m),
        KeyPairCmd::NAME => KeyPairCmd::new(config, params).run(m),
        PerfCmd::NAME => PerfCmd::new(config, params).run(m),
        name => anyhow::bail!("unsupport for {}", name),
    }
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = concat!(env!("DRSA_VERSION_INFO"), " ", env!("DRSA_GIT_INFO"));
    let app = cmd::global_args(
        Command::new("drsa")
            .version(version)
            .about("deterministic rsa key pair from the password")
            .subcommand_required(true)
            .arg_required_else_help(true),
    )
    .subcommand(GenerateCmd::cmd())
    .subcommand(RsaGenCmd::cmd())
    .subcommand(KeyPairCmd::cmd())
    .subcommand(PerfCmd::cmd())
    .get_matches();

    if let Some((name, m)) = app.subcommand() {
        if let Err(e) = run(name, m) {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    }
}
