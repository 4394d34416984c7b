//! serial_sysmon binary.
//!
//! A standalone binary that pushes host system metrics over a serial link to
//! an Arduino readout.

use clap::{Args, Parser, Subcommand};
use futures_util::StreamExt;
use serial_sysmon::{
    locate, DeviceMatcher, LinkConfig, MetricsProvider, PortEnumerator, SerialEmitter,
    SerialportFactory, SystemCollector, SystemPorts, DEFAULT_BAUD_RATE, DEFAULT_HARDWARE_ID,
    DEFAULT_IDLE_DELAY_MS, DEFAULT_SAMPLE_WINDOW_MS,
};
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "serial_sysmon")]
#[command(about = "📟 serial_sysmon - System metrics on an Arduino readout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Samples host system metrics and pushes them over a serial link \
to an attached Arduino readout")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Hardware identifier of the readout board
    #[arg(long, default_value = DEFAULT_HARDWARE_ID)]
    hardware_id: String,

    /// CPU sampling window in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_WINDOW_MS)]
    interval: u64,

    /// Idle delay between monitoring cycles in milliseconds
    #[arg(long, default_value_t = DEFAULT_IDLE_DELAY_MS)]
    idle: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitoring loop (default)
    Run(RunArgs),

    /// Get a single metrics snapshot and exit
    Snapshot(SnapshotArgs),

    /// Print metrics snapshots continuously without hardware
    Watch,

    /// List the serial ports visible to the OS
    Ports,
}

#[derive(Args)]
struct RunArgs {
    /// Keep the loop alive when a transmission fails instead of exiting
    #[arg(long)]
    keep_going: bool,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Run(args)) => {
            run_command(&cli, args).await?;
        }
        Some(Commands::Snapshot(args)) => {
            snapshot_command(&cli, args).await?;
        }
        Some(Commands::Watch) => {
            watch_command(&cli).await?;
        }
        Some(Commands::Ports) => {
            ports_command()?;
        }
        None => {
            // Default to the monitoring loop
            let run_args = RunArgs { keep_going: false };
            run_command(&cli, &run_args).await?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn link_config(cli: &Cli) -> LinkConfig {
    LinkConfig::default()
        .with_baud_rate(cli.baud)
        .with_idle_delay_ms(cli.idle)
}

async fn run_command(cli: &Cli, args: &RunArgs) -> anyhow::Result<()> {
    info!("Starting serial_sysmon...");

    let mut collector =
        SystemCollector::with_sample_window(Duration::from_millis(cli.interval))?;
    info!("System collector initialized");

    let config = link_config(cli);
    let idle_delay = config.idle_delay();
    let emitter = SerialEmitter::new(SerialportFactory, config);
    let matcher = DeviceMatcher::hardware_id(&cli.hardware_id);

    info!("Link configuration:");
    info!("  - Baud rate: {}", cli.baud);
    info!("  - Hardware ID: {}", cli.hardware_id);
    info!("  - Sampling window: {}ms", cli.interval);
    info!("  - Idle delay: {}ms", cli.idle);

    loop {
        // The board is rediscovered every cycle, so replugging it works
        // without restarting.
        let target = locate(&SystemPorts, &matcher)?;
        let snapshot = collector.collect_snapshot().await?;
        let frame = snapshot.encode_frame();

        match emitter.send_frame(target.as_deref(), &frame).await {
            Ok(()) => {}
            Err(err) if args.keep_going => {
                warn!("Transmission failed, continuing: {}", err);
            }
            Err(err) => return Err(err.into()),
        }

        tokio::time::sleep(idle_delay).await;
    }
}

async fn snapshot_command(cli: &Cli, args: &SnapshotArgs) -> anyhow::Result<()> {
    let mut collector =
        SystemCollector::with_sample_window(Duration::from_millis(cli.interval))?;
    let snapshot = collector.collect_snapshot().await?;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&snapshot)?;
            println!("{}", json);
        }
        "pretty" => {
            print_pretty_snapshot(&snapshot);
        }
        _ => {
            anyhow::bail!("unsupported format: {}. Use 'json' or 'pretty'", args.format);
        }
    }

    Ok(())
}

async fn watch_command(cli: &Cli) -> anyhow::Result<()> {
    let mut collector = SystemCollector::new()?;
    let mut stream = collector.start_stream(cli.interval).await?;

    while let Some(snapshot) = stream.next().await {
        println!("{}", snapshot.encode_frame().join(" "));
    }

    Ok(())
}

fn ports_command() -> anyhow::Result<()> {
    let mut ports = SystemPorts.enumerate()?;
    ports.sort_by(|a, b| a.path.cmp(&b.path));

    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    for port in &ports {
        println!("{}: {} [{}]", port.path, port.description, port.hardware_id);
    }

    Ok(())
}

fn print_pretty_snapshot(snapshot: &serial_sysmon::MetricsSnapshot) {
    println!(
        "📟 Metrics Snapshot ({})",
        chrono::DateTime::from_timestamp_millis(snapshot.timestamp as i64)
            .unwrap_or_default()
            .format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("==========================================");
    println!();

    println!("⚡ CPU:");
    for (core, usage) in snapshot.cpu.per_core.iter().enumerate() {
        println!("  Core {}: {:.1}%", core, usage);
    }
    println!();

    println!("🧠 Memory:");
    println!("  RAM: {:.1}%", snapshot.memory.ram_percent);
    println!("  Swap: {:.1}%", snapshot.memory.swap_percent);
    println!();

    println!("💾 Storage:");
    println!("  /home: {:.1}%", snapshot.disks.home_percent);
    println!("  /: {:.1}%", snapshot.disks.root_percent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["serial_sysmon", "--baud", "9600"]).unwrap();
        assert_eq!(cli.baud, 9600);
    }

    #[test]
    fn test_default_values() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["serial_sysmon"]).unwrap();
        assert_eq!(cli.baud, DEFAULT_BAUD_RATE);
        assert_eq!(cli.interval, DEFAULT_SAMPLE_WINDOW_MS);
        assert_eq!(cli.idle, DEFAULT_IDLE_DELAY_MS);
        assert_eq!(cli.hardware_id, DEFAULT_HARDWARE_ID);
    }

    #[test]
    fn test_run_flags() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["serial_sysmon", "run", "--keep-going"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.keep_going),
            _ => panic!("expected run subcommand"),
        }
    }
}
