use log::{debug, error};

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt, mem,
    ops::{Deref, DerefMut},
};

use crate::depth::Depth;
use crate::error::Error;

/// Llrb manage a single instance of in-memory ordered map using
/// [left-leaning-red-black][llrb] tree.
///
/// Not thread safe, all write operations take `&mut self` so that
/// concurrent access needs external serialization.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct Llrb<K, V> {
    name: String,
    root: Option<Box<Node<K, V>>>,
}

/// Different ways to construct a new Llrb instance.
impl<K, V> Llrb<K, V> {
    /// Create an empty instance of Llrb, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Llrb<K, V>
    where
        S: AsRef<str>,
    {
        Llrb {
            name: name.as_ref().to_string(),
            root: Default::default(),
        }
    }

    /// Create a new instance of Llrb tree and load it with entries
    /// from `iter`. Note that iterator should return (key, value) tuples,
    /// later entries overwrite earlier entries with same key.
    pub fn load_from<S, I>(name: S, iter: I) -> Llrb<K, V>
    where
        K: Ord,
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut llrb = Llrb::new(name);
        llrb.extend(iter);
        debug!(target: "llrb", "{:?}, loaded {} entries", llrb.name, llrb.len());
        llrb
    }
}

/// Maintenance API.
impl<K, V> Llrb<K, V> {
    /// Identify this instance. Applications can choose unique names while
    /// creating Llrb instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        size(self.root.as_deref())
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return quickly with basic statisics, only entries() and node_size()
    /// methods are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.len(), mem::size_of::<Node<K, V>>())
    }
}

type Upsert<K, V> = (Box<Node<K, V>>, Option<V>);

/// Write operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, old_value) = Llrb::upsert(self.root.take(), key, value);
        root.set_black();
        self.root = Some(root);
        old_value
    }

    fn upsert(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Upsert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value, false /*black*/), None),
            Some(node) => node,
        };

        let old_value = match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, o) = Llrb::upsert(node.left.take(), key, value);
                node.left = Some(left);
                o
            }
            Ordering::Less => {
                let (right, o) = Llrb::upsert(node.right.take(), key, value);
                node.right = Some(right);
                o
            }
            Ordering::Equal => Some(node.set_value(value)),
        };

        (walkuprot_23(node), old_value)
    }
}

impl<K, V> Extend<(K, V)> for Llrb<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Read operations on Llrb instance.
impl<K, V> Llrb<K, V> {
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(nref) = node {
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return Some(&nref.value),
            };
        }
        None
    }

    /// Return the smallest key in this instance.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// Return the largest key in this instance.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// Return all keys, in sort order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        inorder(self.root.as_deref(), &mut keys);
        keys
    }

    /// Return an iterator over all entries in this instance, in sort order.
    pub fn iter(&self) -> Iter<K, V> {
        let mut iter = Iter {
            paths: Vec::default(),
            remaining: self.len(),
        };
        iter.push_left(self.root.as_deref());
        iter
    }

    pub(crate) fn as_root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
}

fn inorder<K, V>(node: Option<&Node<K, V>>, acc: &mut Vec<K>)
where
    K: Clone,
{
    if let Some(node) = node {
        inorder(node.left_deref(), acc);
        acc.push(node.key.clone());
        inorder(node.right_deref(), acc);
    }
}

/// Validation on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Validate LLRB tree with following rules:
    ///
    /// * Root is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Red links only lean left.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    /// * Subtree count cached in every node is accurate.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        let root = self.root.as_deref();
        let mut stats = self.stats();
        stats.set_depths(Depth::new());

        let res = if is_red(root) {
            Err(Error::RedRoot)
        } else {
            Llrb::validate_tree(root, false, 0, 0, (None, None), &mut stats)
        };
        match res {
            Ok(blacks) => {
                stats.set_blacks(blacks);
                Ok(stats)
            }
            Err(err) => {
                error!(target: "llrb", "{:?}, validate failed: {}", self.name, err);
                Err(err)
            }
        }
    }

    fn validate_tree(
        node: Option<&Node<K, V>>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        (low, high): (Option<&K>, Option<&K>),
        stats: &mut Stats,
    ) -> Result<usize, Error<K>> {
        let node = match node {
            None => {
                if let Some(depths) = stats.depths.as_mut() {
                    depths.sample(depth);
                }
                return Ok(nb);
            }
            Some(node) => node,
        };

        let red = !node.is_black();
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if is_red(node.right_deref()) {
            return Err(Error::RightLeaningRed(node.key.clone()));
        }
        if !red {
            nb += 1;
        }

        match (low, high) {
            (Some(low), _) if node.key.le(low) => {
                return Err(Error::SortError(node.key.clone(), low.clone()));
            }
            (_, Some(high)) if node.key.ge(high) => {
                return Err(Error::SortError(node.key.clone(), high.clone()));
            }
            _ => (),
        }

        let (left, right) = (node.left_deref(), node.right_deref());
        let expected = 1 + size(left) + size(right);
        if node.count != expected {
            return Err(Error::CountMismatch {
                key: node.key.clone(),
                count: node.count,
                expected,
            });
        }

        let lbounds = (low, Some(&node.key));
        let lblacks = Llrb::validate_tree(left, red, nb, depth + 1, lbounds, stats)?;
        let rbounds = (Some(&node.key), high);
        let rblacks = Llrb::validate_tree(right, red, nb, depth + 1, rbounds, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }
}

impl<K, V> fmt::Debug for Llrb<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Drop for Llrb<K, V> {
    fn drop(&mut self) {
        debug!(target: "llrb", "{:?}, dropped {} entries", self.name, self.len());
    }
}

impl<'a, K, V> IntoIterator for &'a Llrb<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

//--------- rotation routines for 2-3 algorithm ----------------

// fix-up after insertion, each check sees the effect of the previous one.
fn walkuprot_23<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(node.right_deref()) && !is_red(node.left_deref()) {
        node = rotate_left(node);
    }
    let left = node.left_deref();
    if is_red(left) && is_red(left.and_then(Node::left_deref)) {
        node = rotate_right(node);
    }
    if is_red(node.left_deref()) && is_red(node.right_deref()) {
        flip(node.deref_mut())
    }
    node.update_count();
    node
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    (r)                 (r)  \
//            /       \                 /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(
        is_red(node.right_deref()),
        "rotate_left(): rotating a black link ? Call the programmer"
    );
    let mut x = match node.right.take() {
        Some(x) => x,
        None => return node,
    };
    node.right = x.left.take();
    x.black = node.black;
    node.set_red();
    node.update_count();
    x.left = Some(node);
    x.update_count();
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//            (r)   \                   (r)  \
//           /       \                 /      \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(
        is_red(node.left_deref()),
        "rotate_right(): rotating a black link ? Call the programmer"
    );
    let mut x = match node.left.take() {
        Some(x) => x,
        None => return node,
    };
    node.left = x.right.take();
    x.black = node.black;
    node.set_red();
    node.update_count();
    x.right = Some(node);
    x.update_count();
    x
}

//       (black)                (red)
//         |                     |
//        node                  node
//        / \                   / \
//    (red) (red)          (blk)   (blk)
//     /      \              /      \
//   left    right         left    right
//
fn flip<K, V>(node: &mut Node<K, V>) {
    debug_assert!(node.is_black(), "flip(): red parent ? Call the programmer");
    debug_assert!(
        is_red(node.left_deref()) && is_red(node.right_deref()),
        "flip(): black child ? Call the programmer"
    );
    if let Some(left) = node.left.as_mut() {
        left.toggle_link();
    }
    if let Some(right) = node.right.as_mut() {
        right.toggle_link();
    }
    node.toggle_link();
}

// Missing child is a black link.
pub(crate) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

fn size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.count)
}

/// Iterator over entries of [`Llrb`], in sort order. Refer to
/// [`Llrb::iter`].
pub struct Iter<'a, K, V> {
    paths: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(nref) = node {
            self.paths.push(nref);
            node = nref.left_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.paths.pop()?;
        self.push_left(node.right_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Node corresponds to a single entry in Llrb instance.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    black: bool,                    // store: black or red
    count: usize,                   // store: size of this sub-tree
    left: Option<Box<Node<K, V>>>,  // store: left child
    right: Option<Box<Node<K, V>>>, // store: right child
}

// Primary operations on a single node.
impl<K, V> Node<K, V> {
    // CREATE operation
    fn new(key: K, value: V, black: bool) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            black,
            count: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn as_key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn left_deref(&self) -> Option<&Node<K, V>> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn right_deref(&self) -> Option<&Node<K, V>> {
        self.right.as_ref().map(Deref::deref)
    }

    // overwrite value in place, return the old value.
    #[inline]
    fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    #[inline]
    fn update_count(&mut self) {
        self.count = 1 + size(self.left_deref()) + size(self.right_deref());
    }

    #[inline]
    fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.black
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statisics via [`Llrb::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Llrb<k,V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types. EG:
    ///
    /// ```
    /// use llrb_map::Llrb;
    /// let llrb: Llrb<u64,u64> = Llrb::new("myinstance");
    ///
    /// // size of key: 8 bytes
    /// // size of value: 8 bytes
    /// // overhead is 32 bytes
    /// assert_eq!(llrb.stats().node_size(), 48);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, available only for full statistics
    /// on a non-empty tree.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if self.entries > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let none = "none".to_string();
        let b = self.blacks.as_ref().map_or(none.clone(), |x| x.to_string());
        let d = self.depths.as_ref().map_or(none, |x| x.to_string());
        writeln!(
            f,
            "llrb = {{ entries={}, node_size={}, blacks={} }}",
            self.entries, self.node_size, b,
        )?;
        write!(f, "llrb.depths = {}", d)
    }
}

#[cfg(test)]
#[path = "llrb_test.rs"]
mod llrb_test;
