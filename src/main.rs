use anyhow::Result;
use tilt_config::AppConfig;
use tilt_orientation::OrientationClient;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

/// Console commands read from stdin.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    ResetPivot,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "r" | "reset" => Some(Command::ResetPivot),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Connect to the configured source, falling back to "no sensor".
async fn open_source(config: &AppConfig) -> OrientationClient {
    let Some(addr) = config.source.address.as_deref() else {
        warn!("No orientation source configured, rotation stays level");
        return OrientationClient::unsupported();
    };

    match OrientationClient::connect(addr, config.orientation).await {
        Ok(client) => {
            info!("Orientation source connected");
            client
        }
        Err(e) => {
            warn!(?e, "Orientation source not available, rotation stays level");
            OrientationClient::unsupported()
        }
    }
}

/// Print transforms until `quit` or `shutdown`. Running out of console input
/// only stops command handling.
async fn run<R, S>(client: &OrientationClient, commands: R, shutdown: S) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut snapshots = client.subscribe();
    let mut commands = commands.lines();
    let mut source_open = true;
    let mut commands_open = true;
    tokio::pin!(shutdown);

    println!("transform: {}", client.snapshot().transform_css());

    loop {
        tokio::select! {
            changed = snapshots.changed(), if source_open => {
                if changed.is_err() {
                    info!("Orientation source ended");
                    source_open = false;
                    continue;
                }
                let snapshot = *snapshots.borrow_and_update();
                if let Some(rotation) = snapshot.rotation {
                    debug!(quat = ?rotation.to_quat(), samples = snapshot.samples, "Rotation updated");
                }
                println!("transform: {}", snapshot.transform_css());
            }
            line = commands.next_line(), if commands_open => {
                let Some(line) = line? else {
                    info!("Console input closed, Ctrl-C to exit");
                    commands_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Some(Command::ResetPivot) => {
                        client.reset_pivot_orientation();
                        info!("Pivot orientation reset requested");
                    }
                    Some(Command::Quit) => break,
                    None => warn!(%line, "Unknown command (r = reset, q = quit)"),
                }
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiltview=info,tilt_orientation=info,tilt_config=info".into()),
        )
        .init();

    info!("tiltview starting");

    // Load config.
    let config = tilt_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    info!(?config.orientation, source = ?config.source.address, "Config loaded");

    let client = open_source(&config).await;
    let stdin = BufReader::new(tokio::io::stdin());
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let result = run(&client, stdin, ctrl_c).await;

    // Unsubscribe before anything else is torn down.
    drop(client);

    if let Err(e) = tilt_config::save_config(&config) {
        error!(?e, "Failed to save config");
    }

    result
}
