use anyhow::Result;
use clap::{Parser, ValueEnum};
use speech_input::plugin::{new_speech_source, SpeechSourceKind};
use speech_input::SpeechSource;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use voice_control::{JsonLinesSink, PublisherState, VoiceControl, VoiceControlConfig};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Source {
    /// Recognizer output piped in, one utterance per line
    Stdin,
    /// Built-in scripted session
    Mock,
}

#[derive(Parser)]
#[command(name = "voice-control")]
#[command(about = "Drive the mobile base from recognized speech")]
struct Args {
    /// JSON config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where recognized speech comes from
    #[arg(long, value_enum, default_value_t = Source::Stdin)]
    source: Source,

    /// Override the publish rate in Hz
    #[arg(long)]
    rate_hz: Option<f64>,

    /// Shut down once the speech source ends
    #[arg(long)]
    exit_on_eof: bool,
}

/// External request to stop the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum StopRequest {
    /// Ctrl-C / SIGINT
    Interrupt,
    /// SIGTERM from `kill`, systemd or a launcher tearing the node down
    Terminate,
}

/// Process stop signals. Handlers are installed on construction.
struct StopSignals {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl StopSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            terminate: tokio::signal::unix::signal(
                tokio::signal::unix::SignalKind::terminate(),
            )?,
        })
    }

    async fn recv(&mut self) -> std::io::Result<StopRequest> {
        #[cfg(unix)]
        {
            tokio::select! {
                res = tokio::signal::ctrl_c() => res.map(|()| StopRequest::Interrupt),
                _ = self.terminate.recv() => Ok(StopRequest::Terminate),
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c()
                .await
                .map(|()| StopRequest::Interrupt)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("voice control failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            VoiceControlConfig::load(path)?
        }
        None => VoiceControlConfig::default(),
    };
    if let Some(hz) = args.rate_hz {
        config.rate_hz = hz;
    }

    let kind = match args.source {
        Source::Stdin => SpeechSourceKind::Stdin,
        Source::Mock => SpeechSourceKind::Mock,
    };
    let mut source = new_speech_source(kind)?;
    info!(
        "Speech source: {} ({})",
        source.name(),
        config.input_topic
    );

    let mut stops = StopSignals::install()?;

    // Commands go to stdout; logs go to stderr.
    let sink = JsonLinesSink::new(config.output_topic.clone(), std::io::stdout());
    let vc = VoiceControl::start(&config, sink)?;

    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<Result<u64>>();
    let handler = Arc::clone(&vc.handler);
    std::thread::Builder::new()
        .name("speech-events".to_string())
        .spawn(move || {
            let outcome = handler.pump(&mut source).map_err(anyhow::Error::from);
            let _ = done_tx.send(outcome);
        })?;

    let exit_on_eof = args.exit_on_eof;
    let watched: Result<()> = {
        let source_done = async move {
            match done_rx.await {
                Ok(Ok(count)) if exit_on_eof => {
                    info!("Speech source ended after {} events, shutting down", count);
                    Ok(())
                }
                Ok(Ok(count)) => {
                    info!(
                        "Speech source ended after {} events, publishing until stopped",
                        count
                    );
                    std::future::pending::<Result<()>>().await
                }
                Ok(Err(e)) => Err(e),
                Err(_) => Err(anyhow::anyhow!("speech thread exited without reporting")),
            }
        };
        let publisher_exit = async {
            while vc.publisher.state() == PublisherState::Running {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        };

        tokio::select! {
            res = stops.recv() => res
                .map(|request| info!("{:?} received, stopping the base", request))
                .map_err(anyhow::Error::from),
            res = source_done => res,
            () = publisher_exit => {
                warn!("Command publisher stopped on its own");
                Ok(())
            }
        }
    };

    let stats = tokio::task::spawn_blocking(move || vc.shutdown()).await??;
    info!(
        "Voice control stopped after {} ticks ({} late), final stop sent: {}",
        stats.ticks, stats.late_ticks, stats.final_stop_sent
    );
    watched
}

fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
