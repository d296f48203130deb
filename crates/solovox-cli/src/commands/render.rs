//! Offline rendering of the demo phrase to a WAV file.
//!
//! Uses the exact render path the live modes use (same block renderer,
//! same command channel, one command applied per block), so a rendered
//! file is a faithful trace of what playback would produce.

use super::load_patch;
use crate::phrase::{demo_phrase, phrase_duration};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use solovox_core::BlockRenderer;
use solovox_io::write_wav;
use solovox_synth::{MonoSynth, command_channel};
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Patch file (TOML); built-in defaults when omitted
    #[arg(short, long)]
    patch: Option<PathBuf>,

    /// Seconds to render (defaults to the phrase length plus its tail)
    #[arg(short, long)]
    duration: Option<f32>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let patch = load_patch(args.patch.as_deref())?;
    let sample_rate = patch.sample_rate as f32;
    let block_size = patch.block_size as usize;

    let events = demo_phrase();
    let seconds = args
        .duration
        .unwrap_or_else(|| phrase_duration(&events, patch.envelope.release));
    let total_samples = (seconds * sample_rate) as usize;
    let total_blocks = total_samples.div_ceil(block_size);

    println!(
        "Rendering {:.2}s ({} blocks of {} frames) at {} Hz...",
        seconds, total_blocks, block_size, patch.sample_rate
    );

    let (mut sender, receiver) = command_channel(events.len() + 1);
    let mut synth = MonoSynth::new(patch.synth_params(), receiver);

    let pb = ProgressBar::new(total_blocks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut output = vec![0.0f32; total_blocks * block_size];
    let mut next_event = 0usize;

    for (block_index, block) in output.chunks_mut(block_size).enumerate() {
        let now = (block_index * block_size) as f32 / sample_rate;
        while next_event < events.len() && events[next_event].at <= now {
            sender.send(events[next_event].command);
            next_event += 1;
        }
        synth.render_block(block);
        pb.inc(1);
    }
    pb.finish_and_clear();

    output.truncate(total_samples);
    write_wav(&args.output, &output, patch.sample_rate)?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
