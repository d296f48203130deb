//! Live playback: MIDI (or the demo phrase) in, audio out.

use super::load_patch;
use crate::{midi, phrase};
use clap::{Args, ValueEnum};
use solovox_config::Patch;
use solovox_io::{
    AudioBackend, BackendStreamConfig, CpalBackend, PullScheduler, ring_sink, start_push_stream,
};
use solovox_synth::{DEFAULT_COMMAND_CAPACITY, LevelReadout, MonoSynth, command_channel};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Which buffer-production discipline delivers audio to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// The backend's real-time thread invokes the renderer directly.
    Push,
    /// A tick loop keeps a small quantized buffer queue ahead of playback.
    Pull,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Patch file (TOML); built-in defaults when omitted
    #[arg(short, long)]
    patch: Option<PathBuf>,

    /// Delivery discipline
    #[arg(long, value_enum, default_value = "push")]
    mode: Mode,

    /// Output device (exact or partial name)
    #[arg(short, long)]
    output: Option<String>,

    /// MIDI input port index (defaults to the last available port)
    #[arg(long)]
    midi_port: Option<usize>,

    /// Loop the built-in demo phrase instead of reading MIDI input
    #[arg(long)]
    demo: bool,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let patch = load_patch(args.patch.as_deref())?;

    let (sender, receiver) = command_channel(DEFAULT_COMMAND_CAPACITY);
    let synth = MonoSynth::new(patch.synth_params(), receiver);
    let level = synth.level_readout();

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    // Control context: either a hardware MIDI port or the scripted phrase.
    // Both own the sender half of the command channel; the guards keep the
    // source alive for the whole session.
    let _midi_connection;
    let _phrase_player;
    if args.demo {
        _phrase_player = Some(phrase::spawn_player(sender, Arc::clone(&running)));
        _midi_connection = None;
        println!("Playing demo phrase (Ctrl+C to stop)...");
    } else {
        _midi_connection = Some(midi::connect(args.midi_port, sender)?);
        _phrase_player = None;
        println!("Listening for MIDI (Ctrl+C to stop)...");
    }

    let backend = CpalBackend::new();
    let stream_config = BackendStreamConfig {
        sample_rate: patch.sample_rate,
        buffer_size: patch.block_size,
        channels: 2,
        device_name: args.output,
    };

    match args.mode {
        Mode::Push => run_push(&backend, &stream_config, synth, &level, &running),
        Mode::Pull => run_pull(&backend, &stream_config, &patch, synth, &level, &running),
    }
}

/// Push discipline: hand the synth to the backend and just meter.
fn run_push(
    backend: &dyn AudioBackend,
    config: &BackendStreamConfig,
    synth: MonoSynth,
    level: &LevelReadout,
    running: &AtomicBool,
) -> anyhow::Result<()> {
    let _stream = start_push_stream(backend, config, synth)?;

    while running.load(Ordering::Relaxed) {
        draw_meter(level.get());
        std::thread::sleep(Duration::from_millis(50));
    }
    finish_meter();
    Ok(())
}

/// Pull discipline: tick the scheduler from this thread while the backend
/// callback drains the byte ring.
fn run_pull(
    backend: &dyn AudioBackend,
    config: &BackendStreamConfig,
    patch: &Patch,
    synth: MonoSynth,
    level: &LevelReadout,
    running: &AtomicBool,
) -> anyhow::Result<()> {
    let block_size = patch.output.pull_buffer_frames as usize;
    let (sink, mut source) = ring_sink(block_size);
    let mut scheduler = PullScheduler::new(synth, sink, block_size);

    let channels = config.channels.max(1) as usize;
    let _stream = backend.build_output_stream(
        config,
        Box::new(move |data: &mut [f32]| source.fill(data, channels)),
        Box::new(|message: &str| tracing::error!(error = message, "audio stream error")),
    )?;

    // Tick comfortably faster than one block period so a single consumed
    // buffer is the common case.
    let tick_interval =
        Duration::from_secs_f32(block_size as f32 / patch.sample_rate as f32 / 4.0);

    let mut ticks = 0u64;
    while running.load(Ordering::Relaxed) {
        scheduler.tick();
        ticks += 1;
        if ticks % 8 == 0 {
            draw_meter(level.get());
        }
        std::thread::sleep(tick_interval);
    }
    finish_meter();

    if scheduler.underruns() > 0 {
        println!("{} underrun(s) during playback", scheduler.underruns());
    }
    Ok(())
}

/// One-line envelope meter, redrawn in place.
fn draw_meter(level: f32) {
    const WIDTH: usize = 30;
    let filled = (level.clamp(0.0, 1.0) * WIDTH as f32).round() as usize;
    print!(
        "\rlevel [{}{}] {:.2}",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        level
    );
    let _ = std::io::stdout().flush();
}

fn finish_meter() {
    println!();
}
