use std::cmp::Ordering;

/// Default number of items a node holds before it splits.
pub const DEFAULT_NODE_CAPACITY: usize = 64;
/// Smallest node capacity accepted by [OrderedTree::new].
pub const MIN_NODE_CAPACITY: usize = 4;

/// The location of an item inside an [OrderedTree].
///
/// A position is only valid until the next insert or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    node: usize,
    slot: usize,
}

/// A sorted sequence stored as a run of bounded, sorted nodes.
///
/// The tree does not know how its items are ordered. Every lookup takes a
/// probe closure that compares a stored item against the key being looked
/// for, so the key never has to be materialised as an item. Callers are
/// responsible for using one consistent order for all operations on the
/// same tree.
///
/// Lookups binary-search the node boundaries and then the node, inserts
/// shift at most one node and split it once it exceeds its capacity.
///
/// ```rust
/// use kestrel::common::util::OrderedTree;
///
/// let mut tree = OrderedTree::new(4);
/// for i in [5, 1, 4, 2, 3] {
///     if let Err(position) = tree.search(|item: &i32| item.cmp(&i)) {
///         tree.insert_at(position, i);
///     }
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
/// assert!(tree.find(|item| item.cmp(&4)).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct OrderedTree<T> {
    nodes: Vec<Vec<T>>,
    node_capacity: usize,
    len: usize,
}

impl<T> OrderedTree<T> {
    /// Creates an empty tree. Capacities below [MIN_NODE_CAPACITY] are raised
    /// to it.
    pub fn new(node_capacity: usize) -> Self {
        OrderedTree {
            nodes: Vec::new(),
            node_capacity: node_capacity.max(MIN_NODE_CAPACITY),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Locates the item for which `probe` returns [Ordering::Equal].
    ///
    /// `probe` compares a stored item with the searched key. Returns
    /// `Ok(position)` of the matching item or `Err(position)` where the key
    /// would be inserted to keep the tree sorted.
    pub fn search<F>(&self, mut probe: F) -> Result<Position, Position>
    where
        F: FnMut(&T) -> Ordering,
    {
        if self.nodes.is_empty() {
            return Err(Position { node: 0, slot: 0 });
        }

        // first node whose largest item is not below the key
        let node = self
            .nodes
            .partition_point(|items| match items.last() {
                Some(last) => probe(last) == Ordering::Less,
                None => true,
            })
            .min(self.nodes.len() - 1);

        match self.nodes[node].binary_search_by(|item| probe(item)) {
            Ok(slot) => Ok(Position { node, slot }),
            Err(slot) => Err(Position { node, slot }),
        }
    }

    pub fn find<F>(&self, probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.search(probe).ok().and_then(|position| self.get(position))
    }

    pub fn find_mut<F>(&mut self, probe: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> Ordering,
    {
        match self.search(probe) {
            Ok(position) => self.get_mut(position),
            Err(_) => None,
        }
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.nodes
            .get(position.node)
            .and_then(|items| items.get(position.slot))
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.nodes
            .get_mut(position.node)
            .and_then(|items| items.get_mut(position.slot))
    }

    /// Inserts `item` at a position returned as `Err` by [OrderedTree::search].
    pub fn insert_at(&mut self, position: Position, item: T) {
        if self.nodes.is_empty() {
            let mut items = Vec::with_capacity(self.node_capacity + 1);
            items.push(item);
            self.nodes.push(items);
            self.len = 1;
            return;
        }

        let node = position.node.min(self.nodes.len() - 1);
        let items = &mut self.nodes[node];
        items.insert(position.slot.min(items.len()), item);
        self.len += 1;

        if items.len() > self.node_capacity {
            let half = items.len() / 2;
            let mut tail = Vec::with_capacity(self.node_capacity + 1);
            tail.extend(items.drain(half..));
            self.nodes.insert(node + 1, tail);
        }
    }

    /// Removes and returns the item at `position`. Empty nodes are dropped.
    pub fn remove_at(&mut self, position: Position) -> Option<T> {
        let items = self.nodes.get_mut(position.node)?;
        if position.slot >= items.len() {
            return None;
        }

        let item = items.remove(position.slot);
        if items.is_empty() {
            self.nodes.remove(position.node);
        }
        self.len -= 1;
        Some(item)
    }

    pub fn first(&self) -> Option<&T> {
        self.nodes.first().and_then(|items| items.first())
    }

    pub fn last(&self) -> Option<&T> {
        self.nodes.last().and_then(|items| items.last())
    }

    /// Iterates the items in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.len = 0;
    }
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        OrderedTree::new(DEFAULT_NODE_CAPACITY)
    }
}
