//! Per-conversion state.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use markup5ever_rcdom::Node;

type NodeKey = (&'static str, usize);

fn key(kind: &'static str, node: &Rc<Node>) -> NodeKey {
    (kind, Rc::as_ptr(node) as usize)
}

/// Facts about nodes memoized for one conversion pass: boolean verdicts
/// and counts.
///
/// Keys are `(kind, node identity)`. Identity is the node's address, which
/// is stable because the pass never outlives the DOM it walks. The memo is
/// created with the pass and dropped with it, so no node reference or
/// verdict leaks into the next conversion.
#[derive(Debug, Default)]
pub struct PassMemo {
    verdicts: RefCell<AHashMap<NodeKey, bool>>,
    counts: RefCell<AHashMap<NodeKey, usize>>,
}

impl PassMemo {
    /// Return the verdict for `(kind, node)`, computing it on first use.
    pub fn get_or_compute(
        &self,
        kind: &'static str,
        node: &Rc<Node>,
        compute: impl FnOnce() -> bool,
    ) -> bool {
        let key = key(kind, node);
        if let Some(&verdict) = self.verdicts.borrow().get(&key) {
            return verdict;
        }
        // `compute` may consult the memo itself, so no borrow is held here.
        let verdict = compute();
        self.verdicts.borrow_mut().insert(key, verdict);
        verdict
    }

    /// Return the count for `(kind, node)`, computing it on first use.
    pub fn get_or_compute_count(
        &self,
        kind: &'static str,
        node: &Rc<Node>,
        compute: impl FnOnce() -> usize,
    ) -> usize {
        let key = key(kind, node);
        if let Some(&count) = self.counts.borrow().get(&key) {
            return count;
        }
        let count = compute();
        self.counts.borrow_mut().insert(key, count);
        count
    }

    /// Record a count ahead of its first lookup, e.g. for every sibling
    /// found while computing one of them.
    pub fn record_count(&self, kind: &'static str, node: &Rc<Node>, count: usize) {
        self.counts.borrow_mut().insert(key(kind, node), count);
    }

    /// Number of verdicts and counts recorded so far.
    pub fn len(&self) -> usize {
        self.verdicts.borrow().len() + self.counts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
