use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use keygen::rsa::KeyPair;
use keygen::Params;

use super::{Cmd, DrsaConfig};
use crate::encode::store_key_pair;
use crate::error::DrsaError;

pub struct RsaGenCmd<'a> {
    config: &'a DrsaConfig,
    params: Params,
}

/// key files arguments shared with the `keygen` command
pub(super) fn key_file_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("public-key")
            .long("public-key")
            .action(ArgAction::Set)
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .help("the public key file, default `public_key.pem`"),
    )
    .arg(
        Arg::new("private-key")
            .long("private-key")
            .action(ArgAction::Set)
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .help("the private key file, default `private_key.pem`"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .required(false)
            .help("print the key pair as json instead of writing the key files"),
    )
}

/// print or save the key pair
pub(super) fn output_key_pair(
    config: &DrsaConfig,
    pair: &KeyPair,
    m: &ArgMatches,
) -> anyhow::Result<()> {
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(pair)?);
        return Ok(());
    }

    let public = m
        .get_one::<PathBuf>("public-key")
        .unwrap_or(&config.public_key_file);
    let private = m
        .get_one::<PathBuf>("private-key")
        .unwrap_or(&config.private_key_file);

    match store_key_pair(pair, public, private) {
        Ok(()) => Ok(()),
        // 密钥已生成, 写文件失败只警告
        Err(e @ DrsaError::IOFailure { .. }) => {
            log::warn!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

impl<'a> RsaGenCmd<'a> {
    pub fn new(config: &'a DrsaConfig, params: Params) -> Self {
        Self { config, params }
    }

    fn read_stream(&self, m: &ArgMatches) -> anyhow::Result<Vec<u8>> {
        let need = self.config.key_stream_size;
        let mut stream = Vec::with_capacity(need);

        match m.get_one::<PathBuf>("input") {
            Some(f) => {
                let file = File::open(f)
                    .with_context(|| format!("cannot open `{}`", f.display()))?;
                file.take(need as u64).read_to_end(&mut stream)?;
            }
            None => {
                std::io::stdin()
                    .lock()
                    .take(need as u64)
                    .read_to_end(&mut stream)?;
            }
        }

        if stream.len() < need {
            return Err(DrsaError::ShortStream {
                need,
                real: stream.len(),
            }
            .into());
        }

        Ok(stream)
    }
}

impl<'a> Cmd for RsaGenCmd<'a> {
    const NAME: &'static str = "rsagen";

    fn cmd() -> Command {
        key_file_args(
            Command::new(Self::NAME)
                .about("generate the rsa key pair from a D-RSA stream read from stdin")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(PathBuf))
                        .required(false)
                        .help("read the stream from the file instead of stdin"),
                ),
        )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let stream = self.read_stream(m)?;
        let pair = KeyPair::from_stream(&self.params, stream.as_slice())?;
        output_key_pair(self.config, &pair, m)
    }
}
