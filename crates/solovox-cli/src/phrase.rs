//! The built-in demo phrase.
//!
//! A short scripted control history used by `play --demo` (live, looped
//! from a control thread) and `render` (offline). It exercises the whole
//! command vocabulary: note-ons with a legato re-pitch, a filter sweep,
//! and a final release.

use solovox_synth::{Command, CommandSender};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// One scheduled command.
#[derive(Debug, Clone, Copy)]
pub struct PhraseEvent {
    /// Seconds from the start of the phrase.
    pub at: f32,
    /// The command to push at that time.
    pub command: Command,
}

/// A minor-ish arpeggio with a slow filter opening.
pub fn demo_phrase() -> Vec<PhraseEvent> {
    let mut events = vec![
        PhraseEvent { at: 0.0, command: Command::ControlChange(10) },
        PhraseEvent { at: 0.0, command: Command::NoteOn(57) },
        PhraseEvent { at: 0.45, command: Command::NoteOn(60) },
        PhraseEvent { at: 0.9, command: Command::NoteOn(64) },
        PhraseEvent { at: 1.35, command: Command::NoteOn(69) },
        PhraseEvent { at: 2.25, command: Command::NoteOn(64) },
        PhraseEvent { at: 2.7, command: Command::NoteOn(57) },
        PhraseEvent { at: 3.6, command: Command::NoteOff },
    ];

    // Sweep the cutoff open across the held notes.
    for step in 1..=16u8 {
        events.push(PhraseEvent {
            at: 0.2 + step as f32 * 0.2,
            command: Command::ControlChange(step * 7),
        });
    }

    events.sort_by(|a, b| a.at.total_cmp(&b.at));
    events
}

/// Seconds until the phrase (including its release tail) has fully decayed.
pub fn phrase_duration(events: &[PhraseEvent], release: f32) -> f32 {
    events.last().map_or(0.0, |e| e.at) + release + 0.25
}

/// Drive the phrase into the channel from a control thread, looping until
/// `running` goes false.
pub fn spawn_player(mut sender: CommandSender, running: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let events = demo_phrase();
        let loop_len = phrase_duration(&events, 0.1);

        while running.load(Ordering::Relaxed) {
            let started = Instant::now();
            for event in &events {
                let due = Duration::from_secs_f32(event.at);
                while started.elapsed() < due {
                    if !running.load(Ordering::Relaxed) {
                        return;
                    }
                    thread::sleep(Duration::from_millis(2));
                }
                if !sender.send(event.command) {
                    tracing::warn!(?event.command, "command channel full, event dropped");
                }
            }
            while started.elapsed() < Duration::from_secs_f32(loop_len) {
                if !running.load(Ordering::Relaxed) {
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
    })
}
