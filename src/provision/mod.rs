//! Provisioning plan and collaborator interface.
//!
//! This module records the node and link creation operations of one
//! generation run in exact construction order. Some lab APIs assign
//! default interfaces as a side effect of node creation, so replaying
//! the operations in any other order is not supported. The remote client
//! that talks to a lab host implements [`LabClient`]; this crate only
//! produces the plan.

use serde::Serialize;

use crate::layout::Point;

/// One side of a link: a node label plus the interface slot on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEnd {
    pub node: String,
    pub slot: u32,
}

/// A single provisioning operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LabOp {
    CreateNode {
        label: String,
        definition: String,
        x: i32,
        y: i32,
    },
    CreateLink {
        a: LinkEnd,
        b: LinkEnd,
    },
}

/// Errors surfaced by a provisioning collaborator
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("lab API error: {0}")]
    Api(String),
    #[error("no connection to the lab host: {0}")]
    Connection(String),
}

/// The remote provisioning collaborator.
///
/// Implementations perform the actual API calls. They own retry and
/// cleanup behavior; the generation core performs neither.
pub trait LabClient {
    fn create_node(&mut self, label: &str, definition: &str, x: i32, y: i32)
        -> Result<(), ProvisionError>;
    fn create_link(&mut self, a: &LinkEnd, b: &LinkEnd) -> Result<(), ProvisionError>;
}

/// Ordered, append-only list of provisioning operations
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionPlan {
    ops: Vec<LabOp>,
}

impl ProvisionPlan {
    pub fn new() -> Self {
        ProvisionPlan::default()
    }

    pub fn add_node(&mut self, label: &str, definition: &str, at: Point) {
        self.ops.push(LabOp::CreateNode {
            label: label.to_string(),
            definition: definition.to_string(),
            x: at.x,
            y: at.y,
        });
    }

    pub fn add_link(&mut self, a_node: &str, a_slot: u32, b_node: &str, b_slot: u32) {
        self.ops.push(LabOp::CreateLink {
            a: LinkEnd {
                node: a_node.to_string(),
                slot: a_slot,
            },
            b: LinkEnd {
                node: b_node.to_string(),
                slot: b_slot,
            },
        });
    }

    pub fn ops(&self) -> &[LabOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Replay the plan against a provisioning collaborator, in order.
    ///
    /// Stops at the first failure and leaves any partially provisioned
    /// state to the collaborator.
    pub fn apply<C: LabClient>(&self, client: &mut C) -> Result<(), ProvisionError> {
        for op in &self.ops {
            match op {
                LabOp::CreateNode {
                    label,
                    definition,
                    x,
                    y,
                } => client.create_node(label, definition, *x, *y)?,
                LabOp::CreateLink { a, b } => client.create_link(a, b)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Client that records call order, used to check replay fidelity
    #[derive(Default)]
    struct RecordingClient {
        calls: Vec<String>,
        fail_on: Option<usize>,
    }

    impl LabClient for RecordingClient {
        fn create_node(
            &mut self,
            label: &str,
            _definition: &str,
            _x: i32,
            _y: i32,
        ) -> Result<(), ProvisionError> {
            if self.fail_on == Some(self.calls.len()) {
                return Err(ProvisionError::Api("boom".to_string()));
            }
            self.calls.push(format!("node {label}"));
            Ok(())
        }

        fn create_link(&mut self, a: &LinkEnd, b: &LinkEnd) -> Result<(), ProvisionError> {
            if self.fail_on == Some(self.calls.len()) {
                return Err(ProvisionError::Api("boom".to_string()));
            }
            self.calls
                .push(format!("link {}:{} {}:{}", a.node, a.slot, b.node, b.slot));
            Ok(())
        }
    }

    fn sample_plan() -> ProvisionPlan {
        let mut plan = ProvisionPlan::new();
        plan.add_node("R1", "iosv", Point::new(0, 0));
        plan.add_node("R2", "iosv", Point::new(0, 200));
        plan.add_link("R1", 0, "R2", 1);
        plan
    }

    #[test]
    fn test_apply_replays_in_order() {
        let mut client = RecordingClient::default();
        sample_plan().apply(&mut client).unwrap();
        assert_eq!(client.calls, vec!["node R1", "node R2", "link R1:0 R2:1"]);
    }

    #[test]
    fn test_apply_stops_at_first_failure() {
        let mut client = RecordingClient {
            fail_on: Some(1),
            ..Default::default()
        };
        assert!(sample_plan().apply(&mut client).is_err());
        assert_eq!(client.calls, vec!["node R1"]);
    }

    #[test]
    fn test_plan_serializes_with_op_tags() {
        let yaml = serde_yaml::to_string(&sample_plan()).unwrap();
        assert!(yaml.contains("op: create_node"));
        assert!(yaml.contains("op: create_link"));
    }
}
