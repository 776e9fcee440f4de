use std::time::Duration;

use clap::{Parser, ValueEnum};
use sbmsread::{BatteryState, LogSink, SbmsClient, SerialConfig, SerialTransport};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// Poll an SBMS battery management system over a serial port
#[derive(Parser, Debug)]
#[command(name = "sbmsread")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serial port the BMS is attached to
    #[arg(long, env = "SBMS_PORT", value_name = "PORT", required_unless_present = "list_ports")]
    port: Option<String>,

    /// Baud rate of the serial port
    #[arg(long, default_value_t = SerialConfig::DEFAULT_BAUD_RATE)]
    baud_rate: u32,

    /// Seconds between polling cycles
    #[arg(long, value_name = "SECONDS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// How each cycle's battery state is printed
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,

    /// List the serial ports on this machine and exit
    #[arg(long)]
    list_ports: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .with(filter)
        .try_init();
}

fn print_state(state: &BatteryState, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => println!("{state:?}"),
        Format::Json => println!("{}", serde_json::to_string(state)?),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_ports {
        for port in SerialTransport::available_ports()? {
            println!("{port}");
        }
        return Ok(());
    }

    let Some(port) = cli.port else {
        anyhow::bail!("No serial port given");
    };
    let config = SerialConfig {
        baud_rate: cli.baud_rate,
        ..SerialConfig::new(port)
    };
    let mut client = SbmsClient::open(&config)?;
    info!("Polling {} every {}s", config.port, cli.interval);

    let mut ticker = interval(Duration::from_secs(cli.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping");
                return Ok(());
            }
        }

        let mut sink = (BatteryState::default(), LogSink);
        match client.poll(&mut sink) {
            Ok(0) => info!("No measurements this cycle"),
            Ok(_) => print_state(&sink.0, cli.format)?,
            Err(err) => warn!("Polling cycle failed: {err:#}"),
        }
    }
}

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["sbmsread", "--port", "/dev/ttyUSB0"]).unwrap();
    assert_eq!(cli.port.as_deref(), Some("/dev/ttyUSB0"));
    assert_eq!(cli.baud_rate, 9600);
    assert_eq!(cli.interval, 30);
    assert_eq!(cli.format, Format::Text);
}

#[test]
fn test_cli_rejects_zero_interval() {
    let result = Cli::try_parse_from(["sbmsread", "--port", "COM3", "--interval", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_list_ports_without_port() {
    let cli = Cli::try_parse_from(["sbmsread", "--list-ports"]).unwrap();
    assert!(cli.list_ports);
    assert_eq!(cli.port, None);
}
