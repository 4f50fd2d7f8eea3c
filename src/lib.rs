#![warn(missing_docs)]
//! Mechanics for operational transformation over linearly-addressed
//! documents, generic with respect to their element domain (not constrained
//! to text).
//!
//! Operational Transformation (OT) enables real-time collaborative editing:
//! every participant edits its own replica immediately, the edits travel as
//! small [`Operation`]s, and transforming concurrent operations against each
//! other brings every replica to the same state regardless of network
//! ordering.
//!
//! The crate provides the three layers needed to build that loop:
//!
//! - the algebra: [`apply`], [`compose`] and [`transform`] over operations
//!   whose payloads are any [`Seq`] (text via `String`, or any other element
//!   sequence);
//! - the [`Client`] state machine, which buffers local edits while one
//!   operation is in flight toward the server;
//! - the [`Server`] loop, which rebases incoming operations past the
//!   committed [`History`] suffix before applying and broadcasting them.
//!
//! Transport, persistence and wire format are left to the embedder.
//!
//! # Usage
//!
//! ```
//! use tandem::{MemoryHistory, Operation, Server, TextDocument};
//!
//! let mut server = Server::new(TextDocument::new(""), MemoryHistory::new());
//!
//! server.apply(0, Operation::new().insert("red"))?;
//! server.apply(1, Operation::new().retain(3).insert("blue"))?;
//!
//! // authored against revision 0, concurrently with both commits above
//! server.apply(0, Operation::new().insert("green"))?;
//!
//! assert_eq!(server.document().contents(), "greenredblue");
//! # Ok::<(), tandem::Error>(())
//! ```

mod action;
mod apply;
mod client;
mod compose;
mod document;
mod error;
mod history;
mod operation;
mod seq;
mod server;
mod transform;

pub use action::Action;
pub use apply::apply;
pub use client::Client;
pub use compose::compose;
pub use document::{Document, TextDocument};
pub use error::Error;
pub use history::{History, MemoryHistory};
pub use operation::Operation;
pub use seq::{Len, Seq};
pub use server::{Committed, Server};
pub use transform::transform;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{
        apply, compose, transform, Action, Client, History, MemoryHistory, Operation, Server,
        TextDocument,
    };

    #[test]
    fn test_end_to_end() {
        let before = "Hello World".to_owned();

        let alice = Operation::new().retain(5).insert(",").retain(6);
        let bob = Operation::new().retain(11).insert("!");

        let (alice_prime, bob_prime) = transform(alice.clone(), bob.clone()).unwrap();

        let alice_first = apply(&apply(&before, &alice).unwrap(), &bob_prime).unwrap();
        let bob_first = apply(&apply(&before, &bob).unwrap(), &alice_prime).unwrap();

        assert_eq!(alice_first, "Hello, World!");
        assert_eq!(alice_first, bob_first);
    }

    #[test]
    fn test_end_to_end_bytes() {
        let before = vec![1u8, 2, 3];

        let alice = Operation::new().retain(1).insert(vec![9u8]).retain(2);
        let bob = Operation::new().retain(2).delete(vec![3u8]);

        let (alice_prime, bob_prime) = transform(alice.clone(), bob.clone()).unwrap();

        let alice_first = apply(&apply(&before, &alice).unwrap(), &bob_prime).unwrap();
        let bob_first = apply(&apply(&before, &bob).unwrap(), &alice_prime).unwrap();

        assert_eq!(alice_first, vec![1, 9, 2]);
        assert_eq!(alice_first, bob_first);
    }

    #[test]
    fn test_client_server_round_trip() {
        let mut server = Server::new(TextDocument::new(""), MemoryHistory::new());
        let mut client = Client::new(TextDocument::new(""));

        let sent = client
            .apply_local(Operation::new().insert("lorem"))
            .unwrap()
            .cloned()
            .unwrap();
        client
            .apply_local(Operation::new().retain(5).insert(" ipsum"))
            .unwrap();

        let committed = server.apply(0, sent).unwrap();
        assert_eq!(committed.revision, 1);

        let sent = client.on_server_ack().unwrap().cloned().unwrap();
        let committed = server.apply(1, sent).unwrap();
        assert_eq!(committed.revision, 2);
        client.on_server_ack().unwrap();

        assert_eq!(server.document().contents(), "lorem ipsum");
        assert_eq!(client.document().contents(), "lorem ipsum");
        assert_eq!(client.in_flight(), None);
        assert_eq!(client.buffer(), None);
    }

    #[test]
    fn test_broadcast_reaches_other_clients() {
        let mut server = Server::new(TextDocument::new(""), MemoryHistory::new());
        let mut alice = Client::new(TextDocument::new(""));
        let mut bob = Client::new(TextDocument::new(""));

        let sent = alice
            .apply_local(Operation::new().insert("hi"))
            .unwrap()
            .cloned()
            .unwrap();
        let committed = server.apply(0, sent).unwrap();
        alice.on_server_ack().unwrap();
        bob.apply_received(committed.operation).unwrap();

        assert_eq!(server.document().contents(), "hi");
        assert_eq!(alice.document().contents(), "hi");
        assert_eq!(bob.document().contents(), "hi");
    }

    type Command = (u8, usize, String);

    /// Builds an operation applicable to `doc` from an arbitrary command
    /// list: whatever the commands leave untouched is retained at the end.
    fn op_from_commands(doc: &str, commands: &[Command]) -> Operation<String> {
        let chars = doc.chars().collect::<Vec<_>>();
        let mut op = Operation::new();
        let mut cursor = 0;

        for (kind, len, text) in commands {
            match kind % 3 {
                0 => op = op.insert(text.clone()),
                1 => {
                    let n = (*len).min(chars.len() - cursor);
                    op = op.retain(n);
                    cursor += n;
                }
                _ => {
                    let n = (*len).min(chars.len() - cursor);
                    op = op.delete(chars[cursor..cursor + n].iter().collect::<String>());
                    cursor += n;
                }
            }
        }

        op.retain(chars.len() - cursor)
    }

    fn commands() -> impl Strategy<Value = Vec<Command>> {
        proptest::collection::vec((any::<u8>(), 1usize..4, "[a-z]{1,3}"), 0..6)
    }

    fn operations() -> impl Strategy<Value = Operation<String>> {
        proptest::collection::vec(
            prop_oneof![
                (1usize..5).prop_map(|n| Action::<String>::Retain(n)),
                "[a-z]{1,4}".prop_map(Action::Insert),
                "[a-z]{1,4}".prop_map(Action::Delete),
            ],
            0..8,
        )
        .prop_map(|actions| actions.into_iter().collect())
    }

    proptest! {
        #[test]
        fn reduce_undoes_expand(op in operations()) {
            prop_assert_eq!(op.expand().reduce(), op);
        }

        #[test]
        fn expand_preserves_lengths(op in operations()) {
            let expanded = op.expand();

            prop_assert_eq!(expanded.pre_len(), op.pre_len());
            prop_assert_eq!(expanded.post_len(), op.post_len());
        }

        #[test]
        fn transform_converges(
            doc in "[a-z]{0,10}",
            a_cmds in commands(),
            b_cmds in commands(),
        ) {
            let a = op_from_commands(&doc, &a_cmds);
            let b = op_from_commands(&doc, &b_cmds);

            let (a_prime, b_prime) = transform(a.clone(), b.clone()).unwrap();

            let a_first = apply(&apply(&doc, &a).unwrap(), &b_prime).unwrap();
            let b_first = apply(&apply(&doc, &b).unwrap(), &a_prime).unwrap();

            prop_assert_eq!(a_first, b_first);
        }

        #[test]
        fn compose_matches_sequential_application(
            doc in "[a-z]{0,10}",
            a_cmds in commands(),
            b_cmds in commands(),
        ) {
            let a = op_from_commands(&doc, &a_cmds);
            let after_a = apply(&doc, &a).unwrap();
            let b = op_from_commands(&after_a, &b_cmds);

            if let Ok(composed) = compose(a, b.clone()) {
                prop_assert_eq!(apply(&doc, &composed), apply(&after_a, &b));
            }
        }

        #[test]
        fn client_document_reflects_pending_operations(
            initial in "[a-z]{0,8}",
            edits in proptest::collection::vec(commands(), 0..4),
        ) {
            let mut client = Client::new(TextDocument::new(initial.clone()));

            for cmds in edits {
                let contents = client.document().contents().to_owned();
                let op = op_from_commands(&contents, &cmds);
                let _ = client.apply_local(op);
            }

            let mut expected = initial;
            if let Some(in_flight) = client.in_flight() {
                expected = apply(&expected, in_flight).unwrap();
            }
            if let Some(buffer) = client.buffer() {
                expected = apply(&expected, buffer).unwrap();
            }

            prop_assert_eq!(client.document().contents(), expected.as_str());
        }

        #[test]
        fn server_document_equals_history_replay(
            scripts in proptest::collection::vec((any::<usize>(), commands()), 1..5),
        ) {
            let mut server = Server::new(TextDocument::new(""), MemoryHistory::new());
            let mut states = vec![String::new()];

            for (parent_pick, cmds) in scripts {
                let parent = parent_pick % states.len();
                let op = op_from_commands(&states[parent], &cmds);
                if server.apply(parent, op).is_ok() {
                    states.push(server.document().contents().to_owned());
                }
            }

            let mut replayed = String::new();
            for (_, op) in server.history().iterate(0) {
                replayed = apply(&replayed, op).unwrap();
            }

            prop_assert_eq!(server.document().contents(), replayed.as_str());
        }
    }
}
