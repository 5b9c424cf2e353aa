use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use keygen::kdf::PBKDF2;
use keygen::{Params, KDF};
use rand::distributions::Uniform;
use rand::Rng;

use super::{Cmd, DrsaConfig, PerfConfig};

/// one row of the performance report
#[derive(Clone, Debug, PartialEq)]
pub struct PerfRecord {
    pub password_size: usize,
    pub salt_size: usize,
    pub iterations: u32,
    pub seconds: f64,
}

/// PBKDF2 setup time over password sizes x salt sizes x iterations
pub struct PerfCmd<'a> {
    config: &'a DrsaConfig,
    params: Params,
}

fn random_lowercase<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    rng.sample_iter(Uniform::new_inclusive(b'a', b'z'))
        .take(len)
        .collect()
}

impl<'a> PerfCmd<'a> {
    pub fn new(config: &'a DrsaConfig, params: Params) -> Self {
        Self { config, params }
    }

    pub fn measure(&self, perf: &PerfConfig) -> anyhow::Result<Vec<PerfRecord>> {
        let mut rng = rand::thread_rng();
        let mut records = Vec::with_capacity(
            perf.password_sizes.len() * perf.salt_sizes.len() * perf.iterations.len(),
        );

        for &password_size in perf.password_sizes.iter() {
            for &salt_size in perf.salt_sizes.iter() {
                for &iterations in perf.iterations.iter() {
                    let password = random_lowercase(&mut rng, password_size);
                    let salt = random_lowercase(&mut rng, salt_size);

                    let now = Instant::now();
                    let mut kdf = PBKDF2::new(self.params.hash(), password, salt, iterations)?;
                    let _material = kdf.kdf(self.params.seed_size() + salt_size)?;
                    let seconds = now.elapsed().as_secs_f64();

                    log::info!(
                        "password size: {password_size}, salt size: {salt_size}, iterations: {iterations}, time: {seconds:.6}s"
                    );
                    records.push(PerfRecord {
                        password_size,
                        salt_size,
                        iterations,
                        seconds,
                    });
                }
            }
        }

        Ok(records)
    }

    pub fn write_csv<W: Write>(mut out: W, records: &[PerfRecord]) -> std::io::Result<()> {
        writeln!(out, "password_size,salt_size,iterations,time_seconds")?;
        for r in records {
            writeln!(
                out,
                "{},{},{},{:.6}",
                r.password_size, r.salt_size, r.iterations, r.seconds
            )?;
        }
        out.flush()
    }
}

impl<'a> Cmd for PerfCmd<'a> {
    const NAME: &'static str = "test";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("measure the PBKDF2 setup time and write the csv report")
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(PathBuf))
                    .required(false)
                    .help("the csv report file, default `performance.csv`"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let perf = &self.config.perf;
        let output = m.get_one::<PathBuf>("output").unwrap_or(&perf.output);

        let records = self.measure(perf)?;

        let file = File::create(output)
            .with_context(|| format!("cannot create `{}`", output.display()))?;
        Self::write_csv(BufWriter::new(file), records.as_slice())?;
        log::info!("the performance report saved to `{}`", output.display());

        Ok(())
    }
}
