#[macro_use]
extern crate log;

use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use submitter_utils::{
    Client, ClientConfiguration, DEFAULT_LABCONFIG, Environment, RecordingTransport,
    SubmitOutcome, SubmitterError, load_configuration, raw_student_id, submit_with,
};

/// Submit the answers of a lab to the submitter.
///
/// The notebook variables are given as a JSON object, and only those
/// declared for the lab in the lab configuration are sent. The outcome is
/// printed on standard out as JSON: the submitted answers, or
/// `{"ok": false, "kind": …, "error": …}`.
#[derive(Parser)]
#[clap(version)]
struct Opt {
    /// Lab name, as declared in the lab configuration
    #[clap(short, long)]
    lab: String,

    /// Lab configuration file
    #[clap(long, default_value = DEFAULT_LABCONFIG)]
    labconfig: PathBuf,

    /// JSON file with the notebook variables, standard in if absent or `-`
    #[clap(short, long)]
    env: Option<PathBuf>,

    /// YAML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Log the request instead of sending it
    #[clap(long)]
    dry_run: bool,
}

fn read_environment(source: Option<&Path>) -> Result<Environment, SubmitterError> {
    let content = match source {
        Some(file) if file != Path::new("-") => {
            fs::read_to_string(file).map_err(|e| SubmitterError::io(file, e))?
        }
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| SubmitterError::io("<stdin>", e))?;
            content
        }
    };
    Ok(serde_json::from_str(&content)?)
}

fn try_submit(opt: &Opt) -> Result<SubmitOutcome, SubmitterError> {
    let config = match opt.config {
        Some(ref file) => load_configuration(file)?,
        None => ClientConfiguration::default(),
    };
    let env = read_environment(opt.env.as_deref())?;
    trace!("environment holds {} variables", env.len());
    Ok(if opt.dry_run {
        let client = Client::new(
            &config.submitter,
            RecordingTransport::default(),
            raw_student_id(),
        );
        submit_with(&client, &opt.labconfig, &opt.lab, &env)
    } else {
        let client = Client::from_configuration(&config.submitter)?;
        submit_with(&client, &opt.labconfig, &opt.lab, &env)
    })
}

fn main() {
    env_logger::init();
    let opt = Opt::parse();
    let outcome = try_submit(&opt).unwrap_or_else(|e| {
        error!("cannot submit answers for {}: {}", opt.lab, e);
        e.into()
    });
    println!("{}", outcome.to_json());
    if !outcome.is_success() {
        process::exit(1);
    }
}
