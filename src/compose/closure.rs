//! Extension-graph flattening.
//!
//! [`collect`] walks a protocol and its parents depth-first, preorder,
//! parents left to right. A protocol reached a second time, through another
//! path of a diamond, is skipped, so every node contributes its members
//! exactly once. Earlier entries are more specific.

use std::collections::HashSet;

use tracing::trace;

use crate::key::MemberKey;
use crate::member::{Member, Scope};
use crate::protocol::{Protocol, ProtocolId};

/// The deduplicated, ordered closure of a protocol.
#[derive(Debug, Clone)]
pub struct Closure {
    nodes: Vec<Protocol>,
}

impl Closure {
    /// Protocols in traversal order, root first.
    #[must_use]
    pub fn protocols(&self) -> &[Protocol] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Protocol> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn contains(&self, protocol: &Protocol) -> bool {
        self.nodes.iter().any(|p| p == protocol)
    }

    /// All members of every protocol in the closure, most specific first.
    pub fn members(&self) -> impl Iterator<Item = &Member> + '_ {
        self.nodes.iter().flat_map(Protocol::members)
    }

    /// Required keys across the closure, each `(scope, key)` pair once, in
    /// first-seen order.
    #[must_use]
    pub fn required_keys(&self) -> Vec<(Scope, MemberKey)> {
        let mut seen: HashSet<(Scope, &MemberKey)> = HashSet::new();
        let mut out = Vec::new();
        for member in self.members().filter(|m| m.is_required()) {
            if seen.insert((member.scope(), member.key())) {
                out.push((member.scope(), member.key().clone()));
            }
        }
        out
    }

    /// Returns true if any protocol in the closure provides a default for
    /// `key` on the `scope` surface.
    #[must_use]
    pub fn provides(&self, scope: Scope, key: &MemberKey) -> bool {
        self.members()
            .any(|m| !m.is_required() && m.scope() == scope && m.key() == key)
    }
}

impl<'a> IntoIterator for &'a Closure {
    type Item = &'a Protocol;
    type IntoIter = std::slice::Iter<'a, Protocol>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Flattens `protocol`'s extension graph into its closure.
///
/// # Examples
///
/// ```
/// use protomix::{collect, ProtocolBuilder};
///
/// let a = ProtocolBuilder::new("A").build()?;
/// let b0 = ProtocolBuilder::new("B0").extends(&a).build()?;
/// let b1 = ProtocolBuilder::new("B1").extends(&a).build()?;
/// let c = ProtocolBuilder::new("C").extends(&b0).extends(&b1).build()?;
///
/// let names: Vec<_> = collect(&c).iter().map(|p| p.name().to_string()).collect();
/// assert_eq!(names, ["C", "B0", "A", "B1"]);
/// # Ok::<(), protomix::DefinitionError>(())
/// ```
#[must_use]
pub fn collect(protocol: &Protocol) -> Closure {
    let mut visited: HashSet<ProtocolId> = HashSet::new();
    let mut nodes = Vec::new();
    let mut stack = vec![protocol];

    // Marking on pop keeps this equal to the recursive preorder walk.
    while let Some(node) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }
        nodes.push(node.clone());
        stack.extend(node.parents().iter().rev());
    }

    trace!(protocol = %protocol.name(), closure = nodes.len(), "closure collected");
    Closure { nodes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::protocol::ProtocolBuilder;
    use crate::value::Value;

    fn names(closure: &Closure) -> Vec<&str> {
        closure.iter().map(Protocol::name).collect()
    }

    #[test]
    fn test_single_protocol() {
        let p = ProtocolBuilder::new("P").build().unwrap();
        let closure = collect(&p);
        assert_eq!(names(&closure), vec!["P"]);
        assert!(!closure.is_empty());
    }

    #[test]
    fn test_preorder_left_to_right() {
        let i = ProtocolBuilder::new("I").build().unwrap();
        let j = ProtocolBuilder::new("J").build().unwrap();
        let h = ProtocolBuilder::new("H").extends(&i).build().unwrap();
        let k = ProtocolBuilder::new("K").extends(&h).extends(&j).build().unwrap();
        assert_eq!(names(&collect(&k)), vec!["K", "H", "I", "J"]);
    }

    #[test]
    fn test_diamond_visits_shared_ancestor_once() {
        let a = ProtocolBuilder::new("A").require("a").build().unwrap();
        let b0 = ProtocolBuilder::new("B0").extends(&a).build().unwrap();
        let b1 = ProtocolBuilder::new("B1").extends(&a).build().unwrap();
        let c = ProtocolBuilder::new("C").extends(&b0).extends(&b1).build().unwrap();

        let closure = collect(&c);
        assert_eq!(names(&closure), vec!["C", "B0", "A", "B1"]);
        assert_eq!(closure.required_keys().len(), 1);
    }

    #[test]
    fn test_repeated_parent_visited_once() {
        let a = ProtocolBuilder::new("A").build().unwrap();
        let b = ProtocolBuilder::new("B").extends(&a).extends(&a).build().unwrap();
        assert_eq!(collect(&b).len(), 2);
    }

    #[test]
    fn test_same_shape_protocols_are_distinct_nodes() {
        let a1 = ProtocolBuilder::new("A").build().unwrap();
        let a2 = ProtocolBuilder::new("A").build().unwrap();
        let b = ProtocolBuilder::new("B").extends(&a1).extends(&a2).build().unwrap();
        assert_eq!(collect(&b).len(), 3);
    }

    #[test]
    fn test_required_keys_deduplicated_across_protocols() {
        let shared = crate::key::MemberKey::from(7i64);
        let p = ProtocolBuilder::new("P").require(shared.clone()).build().unwrap();
        let q = ProtocolBuilder::new("Q")
            .extends(&p)
            .require(shared.clone())
            .require_static(shared.clone())
            .build()
            .unwrap();

        let keys = collect(&q).required_keys();
        assert_eq!(
            keys,
            vec![(Scope::Instance, shared.clone()), (Scope::Static, shared)]
        );
    }

    #[test]
    fn test_provides_respects_scope() {
        let i = ProtocolBuilder::new("I").require("a").build().unwrap();
        let a = i.key("a").unwrap().clone();
        let j = ProtocolBuilder::new("J")
            .extends(&i)
            .provide_static(&a, Descriptor::method(|_, _| Ok(Value::Null)))
            .build()
            .unwrap();

        let closure = collect(&j);
        assert!(closure.provides(Scope::Static, &a));
        assert!(!closure.provides(Scope::Instance, &a));
    }
}
