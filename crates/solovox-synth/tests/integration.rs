//! End-to-end tests of the full signal chain: command channel in,
//! sample blocks out.

use solovox_core::BlockRenderer;
use solovox_synth::{Command, MonoSynth, SynthParams, command_channel};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK: usize = 64;

fn rms(samples: &[f32]) -> f32 {
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Render `seconds` of audio block by block, feeding each `(at, command)`
/// pair into the channel just before the block containing its timestamp.
fn render_with_events(seconds: f32, events: &[(f32, Command)]) -> Vec<f32> {
    let (mut tx, rx) = command_channel(1024);
    let mut synth = MonoSynth::new(SynthParams::default(), rx);

    let total_samples = (seconds * SAMPLE_RATE) as usize;
    let mut output = vec![0.0f32; total_samples];
    let mut next_event = 0usize;

    for (block_index, block) in output.chunks_mut(BLOCK).enumerate() {
        let block_start = block_index * BLOCK;
        let now = block_start as f32 / SAMPLE_RATE;
        while next_event < events.len() && events[next_event].0 <= now {
            assert!(tx.send(events[next_event].1));
            next_event += 1;
        }
        synth.render_block(block);
    }

    output
}

#[test]
fn note_lifecycle_shapes_output_rms() {
    // noteOn(69), 0.05s later controlChange(64), 0.2s later noteOff.
    let events = [
        (0.0, Command::NoteOn(69)),
        (0.05, Command::ControlChange(64)),
        (0.25, Command::NoteOff),
    ];
    let output = render_with_events(0.6, &events);

    let window = |from: f32, to: f32| {
        let a = (from * SAMPLE_RATE) as usize;
        let b = (to * SAMPLE_RATE) as usize;
        rms(&output[a..b])
    };

    // RMS rises through the attack...
    let early = window(0.0, 0.05);
    let late_attack = window(0.05, 0.1);
    assert!(
        early < late_attack,
        "attack not rising: {early} vs {late_attack}"
    );

    // ...plateaus near sustain while the gate holds...
    let plateau = window(0.15, 0.25);
    assert!(plateau > 0.3, "plateau too quiet: {plateau}");
    assert!(late_attack < plateau * 1.05);

    // ...and is near-zero once the release (0.1s) has run out.
    let tail = window(0.4, 0.6);
    assert!(tail < 0.02, "tail not silent: {tail}");
}

#[test]
fn new_note_supersedes_sounding_note() {
    let events = [
        (0.0, Command::NoteOn(69)),
        (0.3, Command::NoteOn(76)), // strictly monophonic: re-pitch, no retrigger
    ];
    let output = render_with_events(0.5, &events);

    // The voice keeps sounding across the re-pitch; no silent gap appears
    // around the second note-on.
    let around_switch = &output[(0.29 * SAMPLE_RATE) as usize..(0.32 * SAMPLE_RATE) as usize];
    assert!(rms(around_switch) > 0.3, "gap at re-pitch: {}", rms(around_switch));
}

#[test]
fn command_history_renders_deterministically() {
    let events = [
        (0.0, Command::NoteOn(60)),
        (0.1, Command::ControlChange(100)),
        (0.2, Command::NoteOff),
    ];
    let first = render_with_events(0.4, &events);
    let second = render_with_events(0.4, &events);
    assert_eq!(first, second);
}

#[test]
fn dropped_commands_do_not_disturb_rendering() {
    let (mut tx, rx) = command_channel(4);
    let mut synth = MonoSynth::new(SynthParams::default(), rx);

    // Flood the channel far past capacity before any block is rendered.
    let mut refused = 0;
    for pitch in 0..60u8 {
        if !tx.send(Command::NoteOn(pitch)) {
            refused += 1;
        }
    }
    assert_eq!(refused, 56);
    assert_eq!(tx.dropped(), 56);

    // Rendering still proceeds a block at a time, applying what was kept.
    let mut block = [0.0f32; BLOCK];
    for _ in 0..8 {
        synth.render_block(&mut block);
    }
    assert!(block.iter().all(|s| s.is_finite()));
}
