use std::any::TypeId;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use fnv::{FnvHashMap, FnvHashSet};
use indexmap::IndexMap;
use thiserror::Error;

use crate::component::{Component, ConfigObject, ObjectKind};

#[derive(Debug, Error)]
pub enum Error {
    /// Both operands of a merge hold an unmergeable value under the same
    /// child name. The merge refuses to pick a winner.
    #[error("merge conflict on child name: {name}")]
    MergeConflict { name: String },
    #[error("no such child: {name}")]
    NoSuchChild { name: String },
}

/// A named child of a bundle: either a nested bundle or a single leaf
/// configuration object.
#[derive(Debug, Clone)]
pub enum Child {
    Node(Bundle),
    Leaf(Component),
}

#[derive(Default)]
struct Inner {
    components: Vec<Component>,
    children: IndexMap<String, Child>,
    // Non-owning back-references. Multiple parents are legal, which is what
    // makes true cycles reachable.
    parents: Vec<Weak<RefCell<Inner>>>,
}

/// A node in a possibly-cyclic named tree of configuration objects.
///
/// `Bundle` is a cheap handle; `Clone` yields another handle to the same
/// node. Node identity is handle identity, so two structurally equal but
/// distinct bundles compare unequal. Use [`copy`](Bundle::copy) or
/// [`deep_clone`](Bundle::deep_clone) to duplicate the graph itself.
#[derive(Clone)]
pub struct Bundle {
    inner: Rc<RefCell<Inner>>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Bundle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Bundle {}

impl std::hash::Hash for Bundle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // children may reach back to self, so do not recurse here
        let inner = self.inner.borrow();
        f.debug_struct("Bundle")
            .field("num_components", &inner.components.len())
            .field("children", &inner.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One entry of the linearized node list produced by the closed-set BFS.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Node(Bundle),
    Leaf(Component),
}

impl Bundle {
    pub fn new() -> Self {
        Bundle {
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Stable identity of this node, used as the closed-set key.
    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    pub fn add_component<T: ConfigObject>(&self, obj: T) -> &Self {
        self.push_component(Rc::new(obj))
    }

    pub fn push_component(&self, obj: Component) -> &Self {
        self.inner.borrow_mut().components.push(obj);
        self
    }

    pub fn add_multiple_components(&self, objs: impl IntoIterator<Item = Component>) -> &Self {
        self.inner.borrow_mut().components.extend(objs);
        self
    }

    /// Components stored directly at this node, in insertion order.
    pub fn components(&self) -> Vec<Component> {
        self.inner.borrow().components.clone()
    }

    /// Clears local components and detaches all children, leaving an empty
    /// node.
    pub fn flush_components(&self) -> &Self {
        let children: Vec<Child> = {
            let mut inner = self.inner.borrow_mut();
            inner.components.clear();
            inner.children.drain(..).map(|(_, v)| v).collect()
        };
        for child in children {
            if let Child::Node(b) = child {
                b.remove_parent(self);
            }
        }
        self
    }

    /// Returns the child bundle under `name`, creating an empty one if the
    /// name is unbound. Panics if the name holds a non-bundle leaf.
    pub fn child(&self, name: &str) -> Bundle {
        match self.get(name) {
            Some(Child::Node(b)) => b,
            Some(Child::Leaf(_)) => panic!("child name holds a leaf object: {}", name),
            None => {
                let node = Bundle::new();
                self.link_child(name, node.clone());
                node
            }
        }
    }

    /// Strict lookup, no node creation.
    pub fn get(&self, name: &str) -> Option<Child> {
        self.inner.borrow().children.get(name).cloned()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.inner.borrow().children.contains_key(name)
    }

    /// Attaches `child` under `name`, replacing any previous value. Warns
    /// when `child` already has a parent, since that creates a shared
    /// subtree and possibly a cycle.
    pub fn set_child(&self, name: &str, child: Bundle) -> &Self {
        let nparents = child.parents().len();
        if nparents > 0 {
            log::warn!(
                "bundle assigned under {:?} already has {} parent(s), subtree is now shared",
                name,
                nparents
            );
        }
        self.link_child(name, child);
        self
    }

    /// Stores a single leaf object under `name`.
    pub fn set_leaf<T: ConfigObject>(&self, name: &str, obj: T) -> &Self {
        self.set_leaf_component(name, Rc::new(obj))
    }

    pub fn set_leaf_component(&self, name: &str, obj: Component) -> &Self {
        let prev = self
            .inner
            .borrow_mut()
            .children
            .insert(name.to_owned(), Child::Leaf(obj));
        if let Some(Child::Node(old)) = prev {
            old.remove_parent(self);
        }
        self
    }

    /// Stores a sequence of leaves under `name`, wrapped in a fresh bundle
    /// holding them as components.
    pub fn set_leaves(&self, name: &str, objs: impl IntoIterator<Item = Component>) -> &Self {
        let node = Bundle::new();
        node.add_multiple_components(objs);
        self.link_child(name, node);
        self
    }

    /// Detaches and returns the child under `name`.
    pub fn remove_child(&self, name: &str) -> Result<Child, Error> {
        let removed = self.inner.borrow_mut().children.shift_remove(name);
        match removed {
            Some(child) => {
                if let Child::Node(b) = &child {
                    b.remove_parent(self);
                }
                Ok(child)
            }
            None => Err(Error::NoSuchChild {
                name: name.to_owned(),
            }),
        }
    }

    /// Live parent nodes of this bundle.
    pub fn parents(&self) -> Vec<Bundle> {
        self.inner
            .borrow()
            .parents
            .iter()
            .filter_map(|w| w.upgrade())
            .map(|inner| Bundle { inner })
            .collect()
    }

    fn link_child(&self, name: &str, child: Bundle) {
        child
            .inner
            .borrow_mut()
            .parents
            .push(Rc::downgrade(&self.inner));
        let prev = self
            .inner
            .borrow_mut()
            .children
            .insert(name.to_owned(), Child::Node(child));
        if let Some(Child::Node(old)) = prev {
            old.remove_parent(self);
        }
    }

    fn remove_parent(&self, parent: &Bundle) {
        let mut inner = self.inner.borrow_mut();
        let target = Rc::as_ptr(&parent.inner);
        if let Some(pos) = inner.parents.iter().position(|w| w.as_ptr() == target) {
            inner.parents.remove(pos);
        }
    }

    pub(crate) fn children_snapshot(&self) -> Vec<(String, Child)> {
        self.inner
            .borrow()
            .children
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Closed-set BFS over the bundle graph, linearizing it into a node
    /// list. The closed set is keyed by node identity so traversal
    /// terminates on cyclic graphs; the FIFO open queue over
    /// insertion-ordered children makes the output deterministic.
    pub(crate) fn serialize(&self, bundles_only: bool) -> Vec<Entry> {
        let mut visited: FnvHashSet<usize> = FnvHashSet::default();
        let mut open: VecDeque<Bundle> = VecDeque::new();
        let mut closed: Vec<Entry> = Vec::new();

        visited.insert(self.key());
        open.push_back(self.clone());

        while let Some(node) = open.pop_front() {
            closed.push(Entry::Node(node.clone()));
            for (_, child) in node.inner.borrow().children.iter() {
                match child {
                    Child::Node(b) => {
                        if visited.insert(b.key()) {
                            open.push_back(b.clone());
                        }
                    }
                    Child::Leaf(c) => {
                        if !bundles_only {
                            closed.push(Entry::Leaf(c.clone()));
                        }
                    }
                }
            }
        }
        closed
    }

    pub(crate) fn bundle_nodes(&self) -> Vec<Bundle> {
        self.serialize(true)
            .into_iter()
            .map(|entry| match entry {
                Entry::Node(b) => b,
                Entry::Leaf(_) => unreachable!("bundles_only traversal yielded a leaf"),
            })
            .collect()
    }

    /// The flat, ordered list of all leaf configuration objects reachable
    /// from this node. Every distinct node contributes its components
    /// exactly once, no matter how many paths reach it.
    pub fn get_all_components(&self) -> Vec<Component> {
        let mut out = Vec::new();
        for entry in self.serialize(false) {
            match entry {
                Entry::Node(b) => out.extend(b.inner.borrow().components.iter().cloned()),
                Entry::Leaf(c) => out.push(c),
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.get_all_components().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topology-preserving shallow copy: every reachable node is rebuilt,
    /// leaf objects are shared by reference. Shared subtrees and cycles in
    /// the source appear identically in the copy.
    pub fn copy(&self) -> Bundle {
        self.copy_graph(false)
    }

    /// Topology-preserving deep copy: like [`copy`](Bundle::copy), but leaf
    /// objects are value-copied into independent allocations.
    pub fn deep_clone(&self) -> Bundle {
        self.copy_graph(true)
    }

    fn copy_graph(&self, deep: bool) -> Bundle {
        let nodes = self.bundle_nodes();
        let mut table: FnvHashMap<usize, Bundle> = FnvHashMap::default();
        for old in &nodes {
            table.insert(old.key(), Bundle::new());
        }

        for old in &nodes {
            let new = table[&old.key()].clone();
            let old_inner = old.inner.borrow();
            new.inner.borrow_mut().components = old_inner
                .components
                .iter()
                .map(|c| if deep { c.deep_clone() } else { c.clone() })
                .collect();
            for (name, child) in old_inner.children.iter() {
                match child {
                    Child::Node(b) => {
                        // re-point to the counterpart node, preserving sharing
                        new.link_child(name, table[&b.key()].clone());
                    }
                    Child::Leaf(c) => {
                        let leaf = if deep { c.deep_clone() } else { c.clone() };
                        new.inner
                            .borrow_mut()
                            .children
                            .insert(name.clone(), Child::Leaf(leaf));
                    }
                }
            }
        }

        table[&self.key()].clone()
    }

    /// In-place union of `other` into `self`. Components are concatenated;
    /// bundle children present on both sides merge recursively; a name
    /// bound to a leaf on one side and to anything on the other is a
    /// conflict.
    pub fn merge(&self, other: &Bundle) -> Result<(), Error> {
        let mut seen = FnvHashSet::default();
        self.merge_inner(other, &mut seen)
    }

    fn merge_inner(
        &self,
        other: &Bundle,
        seen: &mut FnvHashSet<(usize, usize)>,
    ) -> Result<(), Error> {
        if !seen.insert((self.key(), other.key())) {
            return Ok(());
        }

        // snapshot first so merging a bundle into itself cannot alias the
        // RefCell borrows
        let (other_components, other_children): (Vec<Component>, Vec<(String, Child)>) = {
            let o = other.inner.borrow();
            (
                o.components.clone(),
                o.children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        };

        self.inner.borrow_mut().components.extend(other_components);

        for (name, theirs) in other_children {
            match (self.get(&name), theirs) {
                (None, Child::Node(b)) => {
                    self.link_child(&name, b.copy());
                }
                (Some(Child::Node(mine)), Child::Node(theirs)) => {
                    mine.merge_inner(&theirs, seen)?;
                }
                (None, Child::Leaf(c)) => {
                    self.inner
                        .borrow_mut()
                        .children
                        .insert(name, Child::Leaf(c));
                }
                (Some(_), Child::Leaf(_)) | (Some(Child::Leaf(_)), Child::Node(_)) => {
                    return Err(Error::MergeConflict { name });
                }
            }
        }
        Ok(())
    }

    /// Non-mutating union: deep-clones `self`, then merges `other` in.
    pub fn union(&self, other: &Bundle) -> Result<Bundle, Error> {
        let merged = self.deep_clone();
        merged.merge(other)?;
        Ok(merged)
    }

    /// In-place leaf filter over the whole graph: components and leaf
    /// children failing the predicate are dropped; bundle children are
    /// recursed into, never dropped as a unit.
    pub fn filter<F>(&self, pred: F) -> &Self
    where
        F: Fn(&dyn ConfigObject) -> bool,
    {
        for node in self.bundle_nodes() {
            let mut inner = node.inner.borrow_mut();
            inner.components.retain(|c| pred(c.as_ref()));
            inner.children.retain(|_, child| match child {
                Child::Node(_) => true,
                Child::Leaf(c) => pred(c.as_ref()),
            });
        }
        self
    }

    /// A new bundle mirroring this graph's topology exactly, restricted to
    /// the leaves matching `query`. Leaf objects keep their identity (the
    /// copy is shallow).
    pub fn get_subset(&self, query: SubsetQuery) -> Bundle {
        let sub = self.copy();
        sub.filter(|obj| query.matches(obj));
        sub
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = Component;
    type IntoIter = std::vec::IntoIter<Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.get_all_components().into_iter()
    }
}

/// Leaf selection rule for [`Bundle::get_subset`].
///
/// With both filters set, a leaf matches when its kind tag equals `kind`
/// and its concrete type is exactly `exact`. With neither filter set the
/// base rule matches nothing, so the default query yields an empty subset
/// and `SubsetQuery::new().exclude()` keeps everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetQuery {
    kind: Option<ObjectKind>,
    exact: Option<TypeId>,
    exclude: bool,
}

impl SubsetQuery {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn kind(mut self, kind: ObjectKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn exact<T: ConfigObject>(mut self) -> Self {
        self.exact = Some(TypeId::of::<T>());
        self
    }

    /// Inverts the match: keep the non-matching leaves instead.
    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn matches(&self, obj: &dyn ConfigObject) -> bool {
        let hit = match (self.kind, self.exact) {
            (Some(k), Some(t)) => obj.kind() == k && obj.as_any().type_id() == t,
            (Some(k), None) => obj.kind() == k,
            (None, Some(t)) => obj.as_any().type_id() == t,
            (None, None) => false,
        };
        hit != self.exclude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Interface, Package, Service, ServiceState, Tag, TeamInterface};

    #[test]
    fn test_child_autocreate() {
        let b = Bundle::new();
        assert!(!b.has_node("intf"));
        let c1 = b.child("intf");
        assert!(b.has_node("intf"));
        // repeated reads return the same node
        let c2 = b.child("intf");
        assert_eq!(c1, c2);
        assert_eq!(c1.parents(), vec![b.clone()]);
    }

    #[test]
    fn test_leaf_children_and_len() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        b.set_leaf("motd", Tag::new("motd", "benchmark in progress"));
        b.set_leaves(
            "pkgs",
            vec![
                Rc::new(Package::new("netperf")) as Component,
                Rc::new(Package::new("sockperf")) as Component,
            ],
        );
        assert_eq!(b.len(), 4);

        // sequence children are wrapped as a bundle
        match b.get("pkgs") {
            Some(Child::Node(n)) => assert_eq!(n.components().len(), 2),
            other => panic!("expected bundle under pkgs, got {:?}", other),
        }
        // single leaves are stored raw
        assert!(matches!(b.get("motd"), Some(Child::Leaf(_))));
    }

    #[test]
    fn test_reassign_replaces_subtree() {
        let b = Bundle::new();
        let old = b.child("net");
        let new = Bundle::new();
        b.set_child("net", new.clone());
        assert!(old.parents().is_empty());
        assert_eq!(new.parents(), vec![b.clone()]);
    }

    #[test]
    fn test_remove_child() {
        let b = Bundle::new();
        let c = b.child("net");
        assert!(matches!(b.remove_child("net"), Ok(Child::Node(_))));
        assert!(c.parents().is_empty());
        assert!(matches!(
            b.remove_child("net"),
            Err(Error::NoSuchChild { .. })
        ));
    }

    #[test]
    fn test_cycle_len_counts_leaves_once() {
        let b = Bundle::new();
        b.add_component(Package::new("iproute"));
        b.child("intf").add_component(Interface::new("eth0"));
        // assigning an ancestor as a descendant's child creates a cycle
        b.child("intf").set_child("team", b.clone());
        assert_eq!(b.len(), 2);
        assert_eq!(b.get_all_components().len(), 2);
    }

    #[test]
    fn test_iteration_order() {
        let b = Bundle::new();
        b.add_component(Package::new("first"));
        b.child("a").add_component(Package::new("second"));
        b.child("b").add_component(Package::new("third"));
        let names: Vec<String> = b
            .into_iter()
            .map(|c| {
                c.as_any()
                    .downcast_ref::<Package>()
                    .unwrap()
                    .name
                    .clone()
            })
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_copy_shares_leaf_identity() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        b.child("svc").add_component(Service::new("netserver", ServiceState::Running));

        let shallow = b.copy();
        assert_ne!(shallow, b);
        let orig = b.get_all_components();
        let copied = shallow.get_all_components();
        assert_eq!(orig.len(), copied.len());
        for (a, b) in orig.iter().zip(copied.iter()) {
            assert!(Rc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_deep_clone_copies_leaves() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        b.set_leaf("motd", Tag::new("motd", "hello"));

        let deep = b.deep_clone();
        let orig = b.get_all_components();
        let cloned = deep.get_all_components();
        assert_eq!(orig.len(), cloned.len());
        for (a, b) in orig.iter().zip(cloned.iter()) {
            assert!(!Rc::ptr_eq(a, b));
            assert_eq!(format!("{}", a), format!("{}", b));
        }
    }

    #[test]
    fn test_copy_preserves_shared_topology() {
        let b = Bundle::new();
        let shared = Bundle::new();
        shared.add_component(Package::new("common"));
        b.set_child("left", shared.clone());
        b.set_child("right", shared.clone());

        let copied = b.copy();
        let left = match copied.get("left") {
            Some(Child::Node(n)) => n,
            other => panic!("expected bundle, got {:?}", other),
        };
        let right = match copied.get("right") {
            Some(Child::Node(n)) => n,
            other => panic!("expected bundle, got {:?}", other),
        };
        // still one shared node, not two independent copies
        assert_eq!(left, right);
        assert_eq!(left.parents().len(), 2);
        assert_eq!(copied.len(), 1);
    }

    #[test]
    fn test_copy_preserves_cycles() {
        let b = Bundle::new();
        b.add_component(Interface::new("eth0"));
        b.child("intf").set_child("team", b.clone());

        let copied = b.deep_clone();
        let intf = match copied.get("intf") {
            Some(Child::Node(n)) => n,
            other => panic!("expected bundle, got {:?}", other),
        };
        let team = match intf.get("team") {
            Some(Child::Node(n)) => n,
            other => panic!("expected bundle, got {:?}", other),
        };
        assert_eq!(team, copied);
        assert_eq!(copied.len(), 1);
    }

    #[test]
    fn test_union_keeps_operands_intact() {
        let b1 = Bundle::new();
        b1.child("pkgs").add_component(Package::new("package-a"));
        let b2 = Bundle::new();
        b2.child("svcs")
            .add_component(Service::new("service-b", ServiceState::Running));

        let b3 = b1.union(&b2).unwrap();
        assert!(b3.has_node("pkgs"));
        assert!(b3.has_node("svcs"));
        assert_eq!(b3.len(), 2);
        // operands untouched
        assert!(!b1.has_node("svcs"));
        assert_eq!(b1.len(), 1);
        assert_eq!(b2.len(), 1);
    }

    #[test]
    fn test_merge_recursive() {
        let a = Bundle::new();
        a.child("net").add_component(Interface::new("eth0"));
        let b = Bundle::new();
        b.child("net").add_component(Interface::new("eth1"));

        a.merge(&b).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.child("net").components().len(), 2);
    }

    #[test]
    fn test_merge_conflict_on_leaves() {
        let a = Bundle::new();
        a.set_leaf("motd", Tag::new("motd", "a"));
        let b = Bundle::new();
        b.set_leaf("motd", Tag::new("motd", "b"));

        match a.merge(&b) {
            Err(Error::MergeConflict { name }) => assert_eq!(name, "motd"),
            other => panic!("expected merge conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_conflict_leaf_vs_bundle() {
        let a = Bundle::new();
        a.set_leaf("net", Tag::new("net", "flat"));
        let b = Bundle::new();
        b.child("net").add_component(Interface::new("eth0"));

        assert!(matches!(a.merge(&b), Err(Error::MergeConflict { .. })));
    }

    #[test]
    fn test_filter_drops_leaf_children() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        b.set_leaf("motd", Tag::new("motd", "x"));
        b.child("net").add_component(Interface::new("eth0"));

        b.filter(|obj| obj.kind() != ObjectKind::Tag);
        assert!(!b.has_node("motd"));
        // bundle children survive even when emptied
        b.filter(|obj| obj.kind() != ObjectKind::Interface);
        assert!(b.has_node("net"));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_get_subset_by_kind() {
        let b = Bundle::new();
        b.child("net")
            .add_component(Interface::new("eth0"))
            .add_component(Interface::new("eth1"));
        b.child("net")
            .add_component(TeamInterface::new("team0", vec!["eth0".to_owned()]));
        b.add_component(Package::new("iperf3"));
        b.add_component(Package::new("netperf"));

        let ifaces = b.get_subset(SubsetQuery::new().kind(ObjectKind::Interface));
        assert_eq!(ifaces.len(), 3);
        for c in &ifaces {
            assert_eq!(c.kind(), ObjectKind::Interface);
        }

        // exclusion keeps the complement
        let rest = b.get_subset(SubsetQuery::new().kind(ObjectKind::Interface).exclude());
        assert_eq!(rest.len(), 2);
        for c in &rest {
            assert_eq!(c.kind(), ObjectKind::Package);
        }
    }

    #[test]
    fn test_get_subset_exact_type() {
        let b = Bundle::new();
        b.add_component(Interface::new("eth0"));
        b.add_component(TeamInterface::new("team0", vec!["eth0".to_owned()]));

        let kind_only = b.get_subset(SubsetQuery::new().kind(ObjectKind::Interface));
        assert_eq!(kind_only.len(), 2);

        let exact = b.get_subset(SubsetQuery::new().exact::<TeamInterface>());
        assert_eq!(exact.len(), 1);
        assert!(exact.get_all_components()[0]
            .as_any()
            .downcast_ref::<TeamInterface>()
            .is_some());

        let both = b.get_subset(
            SubsetQuery::new()
                .kind(ObjectKind::Interface)
                .exact::<Interface>(),
        );
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn test_get_subset_empty_query() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        b.add_component(Interface::new("eth0"));

        // no filter matches nothing...
        assert_eq!(b.get_subset(SubsetQuery::new()).len(), 0);
        // ...and its exclusion keeps everything
        assert_eq!(b.get_subset(SubsetQuery::new().exclude()).len(), 2);
    }

    #[test]
    fn test_subset_shares_leaf_identity() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        let sub = b.get_subset(SubsetQuery::new().kind(ObjectKind::Package));
        assert!(Rc::ptr_eq(
            &b.get_all_components()[0],
            &sub.get_all_components()[0]
        ));
    }

    #[test]
    fn test_get_subset_on_cyclic_graph() {
        let b = Bundle::new();
        b.add_component(Interface::new("eth0"));
        b.child("intf").set_child("team", b.clone());
        let sub = b.get_subset(SubsetQuery::new().kind(ObjectKind::Interface));
        assert_eq!(sub.len(), 1);
    }

    #[test]
    fn test_flush_components() {
        let b = Bundle::new();
        b.add_component(Package::new("iperf3"));
        let c = b.child("net");
        b.flush_components();
        assert!(b.is_empty());
        assert!(!b.has_node("net"));
        assert!(c.parents().is_empty());
    }
}
