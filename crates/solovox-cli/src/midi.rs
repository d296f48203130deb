//! MIDI input translation.
//!
//! Hardware events are translated 1:1 into [`Command`]s on the control
//! thread midir runs its callback on. The synth is monophonic, so note-offs
//! are counted: holding two keys and lifting one keeps the gate up, and the
//! gate only drops when the last held key is released. Note-on with
//! velocity zero is note-off, per the MIDI running-status convention.

use anyhow::{Context, bail};
use midir::{Ignore, MidiInput, MidiInputConnection};
use solovox_synth::{Command, CommandSender};

const STATUS_MASK: u8 = 0xF0;
const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;
const CONTROL_CHANGE: u8 = 0xB0;

/// Stateful translator from raw MIDI messages to synth commands.
pub struct MidiTranslator {
    sender: CommandSender,
    held_notes: u32,
}

impl MidiTranslator {
    /// Wrap the control half of a command channel.
    pub fn new(sender: CommandSender) -> Self {
        Self {
            sender,
            held_notes: 0,
        }
    }

    /// Translate one raw MIDI message, pushing any resulting command.
    pub fn handle(&mut self, message: &[u8]) {
        let (&status, data) = match message.split_first() {
            Some(parts) => parts,
            None => return,
        };
        let velocity = data.get(1).copied().unwrap_or(0);

        match status & STATUS_MASK {
            NOTE_ON if velocity > 0 => {
                let note = data[0] & 0x7F;
                self.held_notes += 1;
                self.send(Command::NoteOn(note));
            }
            NOTE_ON | NOTE_OFF => {
                if self.held_notes > 0 {
                    self.held_notes -= 1;
                    if self.held_notes == 0 {
                        self.send(Command::NoteOff);
                    }
                }
            }
            CONTROL_CHANGE => {
                if let Some(&value) = data.get(1) {
                    self.send(Command::ControlChange(value & 0x7F));
                }
            }
            _ => {}
        }
    }

    fn send(&mut self, command: Command) {
        if !self.sender.send(command) {
            tracing::warn!(?command, "command channel full, event dropped");
        }
    }
}

/// Open a MIDI input port and translate its events into the channel.
///
/// With no explicit `port_index` the last enumerated input port is used.
/// The returned connection must be kept alive for as long as events should
/// flow.
pub fn connect(
    port_index: Option<usize>,
    sender: CommandSender,
) -> anyhow::Result<MidiInputConnection<()>> {
    let mut input = MidiInput::new("solovox")?;
    input.ignore(Ignore::None);

    let ports = input.ports();
    if ports.is_empty() {
        bail!("no MIDI input ports available (try --demo)");
    }
    for (i, port) in ports.iter().enumerate() {
        let name = input.port_name(port).unwrap_or_else(|_| "unknown".into());
        tracing::info!(port = i, name = %name, "MIDI input");
    }

    let port = match port_index {
        Some(index) => ports
            .get(index)
            .with_context(|| format!("MIDI port {index} does not exist"))?,
        None => ports.last().expect("ports checked non-empty"),
    };
    let port_name = input.port_name(port).unwrap_or_else(|_| "unknown".into());

    let mut translator = MidiTranslator::new(sender);
    let connection = input
        .connect(
            port,
            "solovox-in",
            move |_timestamp, message, _| translator.handle(message),
            (),
        )
        .map_err(|e| anyhow::anyhow!("failed to open MIDI input: {e}"))?;

    tracing::info!(port = %port_name, "listening for MIDI events");
    Ok(connection)
}
