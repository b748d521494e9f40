//! Direction classification of resolved operations.
//!
//! `send` operations carry messages from client to server and need a
//! server-side handler; `receive` operations carry messages from server to
//! client and need a client-side listener. The two lists are built
//! independently, so a message used in both directions lands in both.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Direction, ResolvedMessage, ResolvedOperation};
use crate::ordered::OrderedMap;
use crate::resolve::ResolvedDocument;

/// Messages partitioned by direction, plus the classified operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// Client → server messages, first occurrence first.
    pub send: OrderedMap<String, ResolvedMessage>,
    /// Server → client messages, first occurrence first.
    pub receive: OrderedMap<String, ResolvedMessage>,
    /// Operations with their direction, in document order.
    pub operations: Vec<ResolvedOperation>,
}

/// Partition resolved operations into send and receive message lists.
///
/// Operations are visited in document order and their messages in declared
/// order. An action outside `send`/`receive` fails the whole classification.
pub fn classify(resolved: &ResolvedDocument) -> Result<Classified> {
    let mut send = OrderedMap::new();
    let mut receive = OrderedMap::new();
    let mut operations = Vec::with_capacity(resolved.operations.len());

    for op in &resolved.operations {
        let direction = Direction::from_action(&op.name, &op.action)?;
        let target = match direction {
            Direction::Send => &mut send,
            Direction::Receive => &mut receive,
        };

        for name in &op.messages {
            let message = resolved
                .messages
                .get(name)
                .ok_or_else(|| Error::UnresolvedReference {
                    reference: name.clone(),
                    referenced_by: format!("operation '{}'", op.name),
                })?;
            target.insert_first(name.clone(), message.clone());
        }

        operations.push(ResolvedOperation {
            name: op.name.clone(),
            direction,
            channel: op.channel.clone(),
            description: op.description.clone(),
            messages: op.messages.clone(),
        });
    }

    debug!(
        send = send.len(),
        receive = receive.len(),
        "Classified operations by direction."
    );

    Ok(Classified {
        send,
        receive,
        operations,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::Schema;
    use crate::resolve::OperationRefs;

    fn message(name: &str) -> ResolvedMessage {
        ResolvedMessage {
            name: name.to_string(),
            title: None,
            summary: None,
            content_type: "application/json".to_string(),
            schema_name: format!("{name}Payload"),
            schema: Schema::default(),
        }
    }

    fn op(name: &str, action: &str, messages: &[&str]) -> OperationRefs {
        OperationRefs {
            name: name.to_string(),
            action: action.to_string(),
            description: None,
            channel: "main".to_string(),
            messages: messages.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    fn document(operations: Vec<OperationRefs>) -> ResolvedDocument {
        ResolvedDocument {
            messages: ["ping", "pong", "echo"]
                .into_iter()
                .map(|n| (n.to_string(), message(n)))
                .collect(),
            channels: Vec::new(),
            operations,
        }
    }

    fn names(map: &OrderedMap<String, ResolvedMessage>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_partitions_by_action() {
        let classified = classify(&document(vec![
            op("sendPing", "send", &["ping"]),
            op("receivePong", "receive", &["pong"]),
        ]))
        .unwrap();

        assert_eq!(names(&classified.send), vec!["ping"]);
        assert_eq!(names(&classified.receive), vec!["pong"]);
        assert_eq!(classified.operations[1].direction, Direction::Receive);
    }

    #[test]
    fn test_deduplicates_within_direction() {
        let classified = classify(&document(vec![
            op("a", "send", &["ping", "echo"]),
            op("b", "send", &["echo", "ping"]),
        ]))
        .unwrap();

        assert_eq!(names(&classified.send), vec!["ping", "echo"]);
        assert!(classified.receive.is_empty());
    }

    #[test]
    fn test_bidirectional_message_in_both_lists() {
        let classified = classify(&document(vec![
            op("toServer", "send", &["echo"]),
            op("toClient", "receive", &["echo", "pong"]),
        ]))
        .unwrap();

        assert_eq!(names(&classified.send), vec!["echo"]);
        assert_eq!(names(&classified.receive), vec!["echo", "pong"]);
    }

    #[test]
    fn test_unknown_action() {
        let err = classify(&document(vec![
            op("sendPing", "send", &["ping"]),
            op("publishPong", "publish", &["pong"]),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            Error::UnknownAction { ref operation, ref action }
                if operation == "publishPong" && action == "publish"
        ));
    }

    #[test]
    fn test_operation_message_missing_from_resolved_set() {
        let err = classify(&document(vec![
            op("sendPing", "send", &["ping"]),
            op("sendGhost", "send", &["ghost"]),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            Error::UnresolvedReference { ref reference, ref referenced_by }
                if reference == "ghost" && referenced_by == "operation 'sendGhost'"
        ));
    }
}
