#[macro_use]
extern crate log;

use clap::Parser;
use std::path::PathBuf;
use std::process;
use submitter_utils::{
    Client, ClientConfiguration, PodStarted, PodStartingArgs, RecordingTransport, load_configuration,
    pod_starting, raw_student_id,
};

/// Tell the submitter that this pod is starting, so that answers later
/// submitted from its IP address are credited to its student.
///
/// It is meant to be run from the JupyterHub `postStart` lifecycle hook,
/// with the staff password in `SUBMIT_SERVER_PASSWD`. The derived student
/// identity and the submitter answer are printed on standard out.
///
/// Logging is enabled by setting `RUST_LOG` to the desired
/// level, possibly restricted to this program:
/// `RUST_LOG=pod_starting=trace ./pod-starting …` will generate many traces.
#[derive(Parser)]
#[clap(version)]
struct Opt {
    /// edX anonymous student id
    #[clap(long)]
    edx_anon_id: Option<String>,

    /// Staff password for the submission server
    #[clap(long, env = "SUBMIT_SERVER_PASSWD", hide_env_values = true)]
    submit_passwd: Option<String>,

    /// YAML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Refuse to run without --edx-anon-id
    #[clap(long)]
    require_anon_id: bool,

    /// Log the request instead of sending it
    #[clap(long)]
    dry_run: bool,
}

impl Opt {
    fn configuration(&self) -> eyre::Result<ClientConfiguration> {
        let mut config = match self.config {
            Some(ref file) => load_configuration(file)?,
            None => ClientConfiguration::default(),
        };
        config.require_anon_id |= self.require_anon_id;
        Ok(config)
    }

    fn args(&self) -> PodStartingArgs {
        PodStartingArgs {
            edx_anon_id: self.edx_anon_id.clone(),
            submit_passwd: self.submit_passwd.clone(),
        }
    }
}

fn run(opt: &Opt) -> eyre::Result<()> {
    color_eyre::install()?;
    let config = opt.configuration()?;
    let started: PodStarted = if opt.dry_run {
        let client = Client::new(
            &config.submitter,
            RecordingTransport::default(),
            raw_student_id(),
        );
        pod_starting(&client, &opt.args(), config.require_anon_id)?
    } else {
        let client = Client::from_configuration(&config.submitter)?;
        pod_starting(&client, &opt.args(), config.require_anon_id)?
    };
    println!("{}", started.identity);
    println!("{}", started.reply.body);
    started.reply.error_for_status()?;
    Ok(())
}

fn main() {
    env_logger::init();
    info!("pod starting mode");
    if let Err(e) = run(&Opt::parse()) {
        error!("exiting because of {}", e);
        process::exit(1);
    }
}
