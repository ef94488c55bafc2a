//! Agent hierarchy reshaping for the picker tree.

use crate::types::{AgentNode, StaffRow, User, NON_ASSIGNED_LABEL, NON_ASSIGNED_VALUE};

/// Reshape the staff hierarchy rows into the picker tree, preserving order
/// and nesting depth.
pub fn to_tree(rows: &[StaffRow]) -> Vec<AgentNode> {
    rows.iter().map(root_node).collect()
}

/// Prepend the synthetic "Non Assigned" entry when the user may see
/// unassigned leads; otherwise hand the tree back untouched.
pub fn attach_non_assigned_if_permitted(tree: Vec<AgentNode>, user: &User) -> Vec<AgentNode> {
    if !user.can_view_non_assigned() {
        return tree;
    }
    let mut out = Vec::with_capacity(tree.len() + 1);
    out.push(node(NON_ASSIGNED_VALUE, NON_ASSIGNED_LABEL));
    out.extend(tree);
    out
}

/// Top-level rows map to bare identity nodes; contact metadata is only
/// surfaced on subordinates, matching what the picker renders at each depth.
fn root_node(row: &StaffRow) -> AgentNode {
    let mut n = node(&row.id, &row.name);
    n.children = children_of(row);
    n
}

fn subordinate_node(row: &StaffRow) -> AgentNode {
    let mut n = node(&row.id, &row.name);
    n.email = row.email.clone();
    n.is_email_verified = row.is_email_verified;
    n.children = children_of(row);
    n
}

/// `None` for a leaf. An empty list also counts as a leaf so the picker
/// never renders an expand affordance with nothing behind it.
fn children_of(row: &StaffRow) -> Option<Vec<AgentNode>> {
    row.subordinates
        .as_deref()
        .filter(|subs| !subs.is_empty())
        .map(|subs| subs.iter().map(subordinate_node).collect())
}

fn node(value: &str, name: &str) -> AgentNode {
    AgentNode {
        value: value.to_owned(),
        title: name.to_owned(),
        label: name.to_owned(),
        email: None,
        is_email_verified: None,
        children: None,
    }
}
