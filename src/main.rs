use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Duration;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use announcements::config::Config;
use announcements::{Announcement, Clock, ManualClock, Payload, SystemClock};

#[derive(Parser)]
#[command(name = "announce", about = "Create and inspect encoded announcements")]
struct Args {
    /// Pin the clock to this many UTC milliseconds instead of the wall clock
    #[arg(long, global = true)]
    now_ms: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an announcement and write its payload
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Defaults to a fresh UUID
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        message: Option<String>,
        /// Falls back to ANNOUNCE_DEFAULT_DURATION_SECS
        #[arg(long)]
        duration_secs: Option<i64>,
        /// Output file; stdout if neither this nor ANNOUNCE_PAYLOAD_PATH is set
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode a payload and report whether it is still live
    Inspect {
        /// Input file; stdin if neither this nor ANNOUNCE_PAYLOAD_PATH is set
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    let args = Args::parse();

    let clock: Box<dyn Clock> = match args.now_ms {
        Some(ms) => {
            anyhow::ensure!(
                announcements::TimestampUtc::from_utc_ms(ms).is_some(),
                "--now-ms {ms} is out of range"
            );
            Box::new(ManualClock::new(ms))
        }
        None => Box::new(SystemClock),
    };

    match args.command {
        Command::Create {
            title,
            url,
            id,
            message,
            duration_secs,
            out,
        } => {
            let secs = duration_secs.unwrap_or(config.default_duration_secs);
            let duration = Duration::try_seconds(secs)
                .ok_or_else(|| anyhow::anyhow!("--duration-secs {secs} is out of range"))?;
            let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());

            let announcement =
                Announcement::create(id, title, message, &url, duration, clock.as_ref())
                    .context("Failed to create announcement")?;

            let bytes = announcement.to_payload().to_bytes();
            match out.or(config.payload_path) {
                Some(path) => {
                    fs::write(&path, &bytes)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(
                        "Wrote announcement {} to {}",
                        announcement.id(),
                        path.display()
                    );
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.write_all(b"\n")?;
                }
            }
        }
        Command::Inspect { input } => {
            let bytes = read_input(input.or(config.payload_path).as_deref())?;
            let payload = Payload::from_bytes(&bytes).context("Failed to parse payload")?;
            let announcement =
                Announcement::from_payload(&payload).context("Failed to decode announcement")?;

            println!("id:         {}", announcement.id());
            println!("title:      {}", announcement.title());
            match announcement.message() {
                Some(m) => println!("message:    {m}"),
                None => println!("message:    (none)"),
            }
            println!("url:        {}", announcement.url());
            println!("show_until: {}", announcement.show_until());
            let now = clock.now();
            let expired = announcement.is_expired_at(now);
            println!("expired:    {expired}");
            if !expired {
                let remaining = now
                    .until(announcement.show_until())
                    .unwrap_or_else(Duration::zero);
                println!("remaining:  {}s", remaining.num_seconds());
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
