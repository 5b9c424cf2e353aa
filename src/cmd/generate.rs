use std::io::Write;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use keygen::{Params, RandGen};

use super::{iterations_arg, size_arg, Cmd, DrsaConfig};

pub struct GenerateCmd<'a> {
    config: &'a DrsaConfig,
    params: Params,
}

impl<'a> GenerateCmd<'a> {
    pub fn new(config: &'a DrsaConfig, params: Params) -> Self {
        Self { config, params }
    }
}

impl<'a> Cmd for GenerateCmd<'a> {
    const NAME: &'static str = "generate";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("write the D-RSA pseudo-random stream to stdout")
            .arg(
                Arg::new("password")
                    .value_name("PASSWORD")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(String))
                    .required(true),
            )
            .arg(
                Arg::new("confusion")
                    .value_name("CONFUSION")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(String))
                    .required(true)
                    .help("the confusion string, the PBKDF2 salt"),
            )
            .arg(iterations_arg())
            .arg(size_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (Some(password), Some(confusion), Some(&iterations)) = (
            m.get_one::<String>("password"),
            m.get_one::<String>("confusion"),
            m.get_one::<u32>("iterations"),
        ) else {
            anyhow::bail!("need to specify the password, confusion string and iterations");
        };
        let size = m
            .get_one::<usize>("size")
            .copied()
            .unwrap_or(self.config.stream_size);

        let stream = RandGen::new(&self.params).generate(
            password.as_bytes(),
            confusion.as_bytes(),
            iterations,
            size,
        )?;

        let mut out = std::io::stdout().lock();
        out.write_all(stream.as_slice())?;
        out.flush()?;

        Ok(())
    }
}
