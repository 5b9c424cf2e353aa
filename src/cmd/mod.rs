use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use keygen::{Params, ReseedPolicy};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

mod config;
pub use config::{DrsaConfig, PerfConfig};

mod generate;
pub use generate::GenerateCmd;

mod rsagen;
pub use rsagen::RsaGenCmd;

mod keypair;
pub use keypair::KeyPairCmd;

mod perf;
pub use perf::PerfCmd;

/// global arguments shared by all subcommands
pub fn global_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .action(ArgAction::Set)
            .value_parser(value_parser!(std::path::PathBuf))
            .global(true)
            .required(false)
            .help("the configuration file (json or json5), default `~/.drsa/config.json`"),
    )
    .arg(
        Arg::new("max-retries")
            .long("max-retries")
            .action(ArgAction::Set)
            .value_parser(value_parser!(u64))
            .global(true)
            .required(false)
            .help("maximum rejected candidates in one iteration, unlimited if not specified"),
    )
    .arg(
        Arg::new("reseed")
            .long("reseed")
            .action(ArgAction::Set)
            .value_parser(["chain", "tail", "repeat"])
            .global(true)
            .required(false)
            .help("the seed after a rejected candidate"),
    )
}

/// configuration parameters overridden by the global arguments
pub fn params(config: &DrsaConfig, m: &ArgMatches) -> anyhow::Result<Params> {
    let mut builder = config.params_builder()?;

    if let Some(&max) = m.get_one::<u64>("max-retries") {
        builder = builder.max_retries(Some(max));
    }

    if let Some(policy) = m.get_one::<String>("reseed") {
        builder = builder.reseed(policy.parse::<ReseedPolicy>()?);
    }

    Ok(builder.build()?)
}

fn size_arg() -> Arg {
    Arg::new("size")
        .long("size")
        .short('s')
        .action(ArgAction::Set)
        .value_parser(value_parser!(usize))
        .required(false)
        .help("the stream byte size")
}

fn iterations_arg() -> Arg {
    Arg::new("iterations")
        .value_name("ITERATIONS")
        .action(ArgAction::Set)
        .value_parser(value_parser!(u32).range(1..))
        .required(true)
        .help("PBKDF2 iterations, also the rounds of the stream generation")
}
