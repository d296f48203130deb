//! Property-based tests for the command channel.

use proptest::prelude::*;
use solovox_synth::{Command, command_channel};

fn any_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (0u8..=127).prop_map(Command::NoteOn),
        Just(Command::NoteOff),
        (0u8..=127).prop_map(Command::ControlChange),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any sequence not exceeding capacity between drains is delivered in
    /// FIFO order, each command exactly once.
    #[test]
    fn fifo_exactly_once(commands in prop::collection::vec(any_command(), 0..=256)) {
        let (mut tx, mut rx) = command_channel(256);

        for &command in &commands {
            prop_assert!(tx.send(command));
        }

        let mut drained = Vec::new();
        while let Some(command) = rx.recv() {
            drained.push(command);
        }
        prop_assert_eq!(drained, commands);
        prop_assert_eq!(tx.dropped(), 0);
    }

    /// Overflow drops only the excess; the retained prefix survives intact
    /// and in order.
    #[test]
    fn overflow_preserves_queued_prefix(
        commands in prop::collection::vec(any_command(), 17..=64),
    ) {
        // Capacity 16: everything past the first 16 sends is refused.
        let (mut tx, mut rx) = command_channel(16);

        let mut accepted = 0usize;
        for &command in &commands {
            if tx.send(command) {
                accepted += 1;
            }
        }
        prop_assert_eq!(accepted, 16);
        prop_assert_eq!(tx.dropped(), (commands.len() - 16) as u64);

        let mut drained = Vec::new();
        while let Some(command) = rx.recv() {
            drained.push(command);
        }
        prop_assert_eq!(drained.as_slice(), &commands[..16]);
    }

    /// Interleaved send/drain cycles never lose or reorder accepted
    /// commands.
    #[test]
    fn interleaved_cycles_preserve_order(
        batches in prop::collection::vec(
            prop::collection::vec(any_command(), 0..=8),
            1..=32,
        ),
    ) {
        let (mut tx, mut rx) = command_channel(8);
        for batch in &batches {
            let mut sent = Vec::new();
            for &command in batch {
                if tx.send(command) {
                    sent.push(command);
                }
            }
            let mut drained = Vec::new();
            while let Some(command) = rx.recv() {
                drained.push(command);
            }
            prop_assert_eq!(drained, sent);
        }
    }
}
