use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use singalong::lyrics::{demo_timing, parse_timing, Aligner, TimedToken};
use singalong::render::{format_timestamp, render_window};
use singalong::{create_router, AppState, Config, KaraokeSession, SimulatedClock, SongInfo, WavFileDevice};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "singalong")]
#[command(about = "Time-synchronized sing-along lyrics")]
struct Cli {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/singalong")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Align a transcript with a word-timing file and print the phrases as JSON
    Align {
        /// Word-timing JSON array ({text, time|start})
        #[arg(short, long)]
        timing: PathBuf,

        /// Transcript, one phrase per line
        #[arg(short = 'x', long)]
        transcript: Option<PathBuf>,
    },

    /// Play the lyrics against a simulated clock in the terminal
    Play {
        /// Word-timing JSON array (demo lyrics when omitted)
        #[arg(short, long)]
        timing: Option<PathBuf>,

        /// Transcript, one phrase per line
        #[arg(short = 'x', long)]
        transcript: Option<PathBuf>,

        /// Track length in seconds (defaults to a few seconds past the last word)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Song title
        #[arg(long, default_value = "Unknown Track")]
        title: String,

        /// Record a take from this WAV file as the microphone
        #[arg(long)]
        capture: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;
    let aligner = Aligner::new(cfg.lyrics.empty_transcript);

    info!("Loaded config: {}", cfg.service.name);

    match cli.command {
        Command::Align { timing, transcript } => {
            let timing = read_timing(&timing)?;
            let transcript = read_transcript(transcript.as_ref())?;
            let lyrics = aligner.align(transcript.as_deref(), &timing);
            println!("{}", serde_json::to_string_pretty(&lyrics)?);
        }

        Command::Play {
            timing,
            transcript,
            duration,
            title,
            capture,
        } => {
            let timing = match timing {
                Some(path) => read_timing(&path)?,
                None => {
                    info!("No timing file given, using demo lyrics");
                    demo_timing()
                }
            };
            let transcript = read_transcript(transcript.as_ref())?;
            let lyrics = aligner.align(transcript.as_deref(), &timing);

            let duration = duration.unwrap_or_else(|| {
                timing.last().map_or(0.0, |token| token.time) + 5.0
            });

            let song = SongInfo {
                title: title.clone(),
                artist: None,
            };
            let mut session = KaraokeSession::new(
                cfg.session_config(),
                song,
                lyrics,
                Box::new(SimulatedClock::new(duration)),
            );

            if let Some(path) = capture {
                let device = WavFileDevice::open(&path, cfg.capture_config())?;
                session.start_capture(Box::new(device)).await?;
            }

            println!("{} ({})", title, format_timestamp(duration));

            let lyrics = session.lyrics().clone();
            let mut last_line = String::new();
            let playback = session.run(|frame| {
                let window = render_window(&lyrics, &frame.snapshot, 0);
                let line = window.join("");
                if line != last_line {
                    println!("[{}] {}", format_timestamp(frame.playback.current_time), line);
                    last_line = line;
                }
            });

            tokio::select! {
                result = playback => result?,
                _ = tokio::signal::ctrl_c() => warn!("Interrupted"),
            }

            let stats = session.stop().await?;
            if let Some(take) = &stats.take {
                info!("Take saved to {}", take.file_path.display());
            }
            info!(
                "Played {:.1}s, {} phrase changes",
                stats.position_secs, stats.phrase_changes
            );
        }

        Command::Serve => {
            let state = AppState::new(aligner, cfg.session_config());
            let app = create_router(state);
            let address = cfg.bind_address();

            let listener = tokio::net::TcpListener::bind(&address)
                .await
                .with_context(|| format!("Failed to bind {}", address))?;
            info!("HTTP server listening on {}", address);

            axum::serve(listener, app).await.context("HTTP server failed")?;
        }
    }

    Ok(())
}

fn read_timing(path: &PathBuf) -> Result<Vec<TimedToken>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timing file {}", path.display()))?;
    parse_timing(&json)
}

fn read_transcript(path: Option<&PathBuf>) -> Result<Option<String>> {
    path.map(|path| {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))
    })
    .transpose()
}
