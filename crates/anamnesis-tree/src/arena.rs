//! Arena-backed question tree.

use anamnesis_core::errors::TreeError;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::layout::TreeLayout;

/// Index of a node in the tree arena.
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root. It carries no question of its own.
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    question: Option<String>,
    children: Vec<NodeId>,
    groups: Vec<GroupEntry>,
}

/// A mutually-exclusive question group attached to one tree node.
#[derive(Debug, Clone)]
pub struct GroupEntry {
    id: String,
    members: Vec<NodeId>,
}

impl GroupEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Member nodes in declaration order.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }
}

/// The interview scope hierarchy.
///
/// Direct children widen into a topic once their question is confirmed;
/// group members do the same but exclude their siblings. Every question
/// and group is placed exactly once, so lookups are index hits and the
/// path to the root is unambiguous.
#[derive(Debug, Clone)]
pub struct QuestionTree {
    nodes: Vec<Node>,
    question_index: FxHashMap<String, NodeId>,
    group_index: FxHashMap<String, (NodeId, usize)>,
}

impl QuestionTree {
    /// Compile a declarative layout, nesting recursively from the root.
    pub fn build(layout: &TreeLayout) -> Result<Self, TreeError> {
        let mut tree = Self {
            nodes: vec![Node {
                parent: None,
                question: None,
                children: Vec::new(),
                groups: Vec::new(),
            }],
            question_index: FxHashMap::default(),
            group_index: FxHashMap::default(),
        };

        for question in &layout.general_questions {
            tree.place_question(NodeId::ROOT, question, layout)?;
        }
        for group in &layout.general_groups {
            tree.place_group(NodeId::ROOT, group, layout)?;
        }

        debug!(
            nodes = tree.nodes.len(),
            groups = tree.group_index.len(),
            "question tree built"
        );
        Ok(tree)
    }

    fn place_question(
        &mut self,
        parent: NodeId,
        question: &str,
        layout: &TreeLayout,
    ) -> Result<NodeId, TreeError> {
        let node = self.alloc(parent, question)?;
        self.nodes[parent.0].children.push(node);
        self.place_nested(node, question, layout)?;
        Ok(node)
    }

    fn place_group(
        &mut self,
        parent: NodeId,
        group: &str,
        layout: &TreeLayout,
    ) -> Result<(), TreeError> {
        if self.group_index.contains_key(group) {
            return Err(TreeError::DuplicateGroupPlacement {
                group: group.to_string(),
            });
        }

        let mut members = Vec::new();
        for row in layout.group_questions.iter().filter(|r| r.group == group) {
            let member = self.alloc(parent, &row.question)?;
            self.place_nested(member, &row.question, layout)?;
            members.push(member);
        }
        if members.is_empty() {
            return Err(TreeError::EmptyGroup {
                group: group.to_string(),
            });
        }

        let entry_index = self.nodes[parent.0].groups.len();
        self.nodes[parent.0].groups.push(GroupEntry {
            id: group.to_string(),
            members,
        });
        self.group_index.insert(group.to_string(), (parent, entry_index));
        Ok(())
    }

    /// Allocate and index a node. The uniqueness check doubles as cycle
    /// detection: a branch looping back must re-place a question that is
    /// already in the tree.
    fn alloc(&mut self, parent: NodeId, question: &str) -> Result<NodeId, TreeError> {
        if self.question_index.contains_key(question) {
            return Err(TreeError::DuplicateQuestionPlacement {
                question: question.to_string(),
            });
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            question: Some(question.to_string()),
            children: Vec::new(),
            groups: Vec::new(),
        });
        self.question_index.insert(question.to_string(), id);
        Ok(id)
    }

    fn place_nested(
        &mut self,
        node: NodeId,
        question: &str,
        layout: &TreeLayout,
    ) -> Result<(), TreeError> {
        for branch in layout.question_branches.iter().filter(|b| b.question == question) {
            self.place_question(node, &branch.child_question, layout)?;
        }
        for branch in layout.group_branches.iter().filter(|b| b.question == question) {
            self.place_group(node, &branch.group, layout)?;
        }
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Node count including the synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Question answered at `node`; `None` for the root.
    pub fn question(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].question.as_deref()
    }

    /// Direct question children of `node`, in declaration order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Groups attached to `node`, in declaration order.
    pub fn groups_at(&self, node: NodeId) -> &[GroupEntry] {
        &self.nodes[node.0].groups
    }

    /// Node answering `question`, wherever it sits in the tree.
    pub fn node_of(&self, question: &str) -> Option<NodeId> {
        self.question_index.get(question).copied()
    }

    /// Direct child of `node` answering `question`.
    pub fn child_question(&self, node: NodeId, question: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.question(child) == Some(question))
    }

    /// Group entry at `node` containing `question`, with the member node.
    pub fn member_question(&self, node: NodeId, question: &str) -> Option<(&GroupEntry, NodeId)> {
        for entry in self.groups_at(node) {
            let member = entry
                .members
                .iter()
                .copied()
                .find(|&m| self.question(m) == Some(question));
            if let Some(member) = member {
                return Some((entry, member));
            }
        }
        None
    }

    /// Member question ids of `group`, in declaration order.
    pub fn members_of_group(&self, group: &str) -> Option<Vec<&str>> {
        let (node, entry_index) = self.group_index.get(group).copied()?;
        let entry = &self.nodes[node.0].groups[entry_index];
        Some(entry.members.iter().filter_map(|&m| self.question(m)).collect())
    }

    /// Questions on the path from the root down to `question`, inclusive.
    pub fn path_to(&self, question: &str) -> Option<Vec<&str>> {
        let mut node = self.node_of(question)?;
        let mut path = Vec::new();
        while let Some(q) = self.question(node) {
            path.push(q);
            node = self.parent(node)?;
        }
        path.reverse();
        Some(path)
    }
}
