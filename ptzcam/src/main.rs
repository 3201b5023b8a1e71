use clap::Parser;
use ptzcam::{
    camera,
    protocol::{command::DEFAULT_TOOL, ControlName, Device},
    exit_status, run_cycle, Error, Result, Sequencer, Shell, DEFAULT_DELAY,
};
use std::{process::ExitCode, time::Duration};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// USB PTZ camera test cycle.
///
/// Finds the first USB camera listed by v4l2-ctl, then moves it to its
/// center, maximum and minimum positions and back to center, pausing after
/// each move.
///
/// Exit status: 0 on success, 1 if a command failed, 2 if no camera was
/// found, 3 if the camera lacks absolute pan or zoom, 4 if the shell could
/// not be started.
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
struct CliParser {
    /// Device node to use, instead of the first USB camera found.
    #[clap(short, long)]
    pub device: Option<String>,

    /// Pause after each move, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Device control tool.
    #[clap(long, default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Print the camera's pan, tilt and zoom ranges, and exit without moving
    /// it.
    #[clap(long)]
    pub probe: bool,

    /// Exit with status 255 on both success and failure.
    #[clap(long)]
    pub legacy_exit_code: bool,
}

async fn select_device(opts: &CliParser) -> Result<Device> {
    match &opts.device {
        Some(path) => Ok(Device::new(path.as_str(), path.as_str())),
        None => camera::get_first_camera(&Shell, &opts.tool)
            .await?
            .ok_or(Error::NoDeviceFound),
    }
}

async fn probe(opts: &CliParser) -> Result {
    let device = select_device(opts).await?;
    let caps = camera::get_capabilities(&Shell, &opts.tool, &device).await?;

    println!("{device}");
    for control in ControlName::ALL {
        match caps.get(control) {
            Some(range) => println!("  {control:>15}: {range}"),
            None => println!("  {control:>15}: unsupported"),
        }
    }
    println!("  groups: {:?}", caps.groups());
    Ok(())
}

async fn run(opts: &CliParser) -> Result {
    if opts.probe {
        return probe(opts).await;
    }

    let delay = Duration::from_millis(opts.delay_ms);
    match &opts.device {
        None => run_cycle(&Shell, &opts.tool, delay).await,
        Some(_) => {
            let device = select_device(opts).await?;
            info!("using camera {device}");
            Sequencer::new(&Shell, &opts.tool)
                .with_delay(delay)
                .run_device(&device)
                .await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .compact()
        .init();
    let opts = CliParser::parse();

    let result = run(&opts).await;
    if let Err(e) = &result {
        error!("{e}");
    }
    ExitCode::from(exit_status(&result, opts.legacy_exit_code))
}
