use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use keygen::rsa::generate_key_pair;
use keygen::Params;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

use super::rsagen::{key_file_args, output_key_pair};
use super::{iterations_arg, size_arg, Cmd, DrsaConfig};

/// password -> D-RSA stream -> rsa key pair in one step
pub struct KeyPairCmd<'a> {
    config: &'a DrsaConfig,
    params: Params,
}

impl<'a> KeyPairCmd<'a> {
    pub fn new(config: &'a DrsaConfig, params: Params) -> Self {
        Self { config, params }
    }

    fn password(m: &ArgMatches) -> anyhow::Result<String> {
        if let Some(p) = m.get_one::<String>("password") {
            return Ok(p.clone());
        }

        let mut passwd1 = rpassword::prompt_password("Input password: ")?;
        let mut passwd2 = rpassword::prompt_password("Input again: ")?;
        let same = passwd1 == passwd2;

        #[cfg(feature = "sec-zeroize")]
        passwd2.zeroize();
        #[cfg(not(feature = "sec-zeroize"))]
        passwd2.clear();

        if !same {
            #[cfg(feature = "sec-zeroize")]
            passwd1.zeroize();
            #[cfg(not(feature = "sec-zeroize"))]
            passwd1.clear();
            anyhow::bail!("the two passwords are not the same");
        }

        Ok(passwd1)
    }
}

impl<'a> Cmd for KeyPairCmd<'a> {
    const NAME: &'static str = "keygen";

    fn cmd() -> Command {
        key_file_args(
            Command::new(Self::NAME)
                .about("derive the rsa key pair from the password")
                .arg(
                    Arg::new("confusion")
                        .value_name("CONFUSION")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(String))
                        .required(true)
                        .help("the confusion string, the PBKDF2 salt"),
                )
                .arg(iterations_arg())
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(String))
                        .required(false)
                        .help("the password, it will be prompted if not specified"),
                )
                .arg(size_arg().help("the stream byte size, default 256")),
        )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (Some(confusion), Some(&iterations)) = (
            m.get_one::<String>("confusion"),
            m.get_one::<u32>("iterations"),
        ) else {
            anyhow::bail!("need to specify the confusion string and iterations");
        };
        let size = m
            .get_one::<usize>("size")
            .copied()
            .unwrap_or(self.config.key_stream_size);

        let mut password = Self::password(m)?;
        let pair = generate_key_pair(
            &self.params,
            password.as_bytes(),
            confusion.as_bytes(),
            iterations,
            size,
        );

        #[cfg(feature = "sec-zeroize")]
        password.zeroize();
        #[cfg(not(feature = "sec-zeroize"))]
        password.clear();

        let pair = pair?;
        log::debug!("public key: {}", pair.public_key());

        output_key_pair(self.config, &pair, m)
    }
}
