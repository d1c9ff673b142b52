use crate::config::GcConfig;
use crate::errors::{GcError, HeapError, StackError};
use crate::runtime::gc::{CollectStats, Heap};
use crate::runtime::stack::Stack;
use crate::runtime::value::{ObjRef, Object};

/// One independent heap together with the root stack that keeps its objects alive.
///
/// Every operation runs to completion before returning; a collection triggered by an
/// allocation finishes before that allocation proceeds. Dropping the context (or calling
/// [`Context::destroy`]) empties the roots and runs a final cycle, so no object outlives it.
#[derive(Debug)]
pub struct Context {
    config: GcConfig,
    stack: Stack,
    heap: Heap,
    collections: usize,
    last_collection: Option<CollectStats>,
    released: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::build(GcConfig::default())
    }

    pub fn with_config(config: GcConfig) -> Result<Self, GcError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GcConfig) -> Self {
        Self {
            config,
            stack: Stack::new(config.stack_max),
            heap: Heap::new(config.initial_threshold).with_max_objects(config.max_objects),
            collections: 0,
            last_collection: None,
            released: false,
        }
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    /// Roots an existing object.
    pub fn push_root(&mut self, obj: ObjRef) -> Result<(), GcError> {
        if !self.heap.contains(obj) {
            return Err(HeapError::DanglingReference { index: obj.index() }.into());
        }
        self.stack.push(obj).inspect_err(warn_stack)?;
        Ok(())
    }

    pub fn pop_root(&mut self) -> Result<ObjRef, GcError> {
        Ok(self.stack.pop().inspect_err(warn_stack)?)
    }

    pub fn peek_root(&self) -> Result<ObjRef, GcError> {
        Ok(self.stack.peek()?)
    }

    /// Allocates an integer and roots it.
    pub fn push_int(&mut self, value: i32) -> Result<ObjRef, GcError> {
        self.stack.ensure_room().inspect_err(warn_stack)?;
        self.maybe_collect();
        let obj = self.heap.alloc(Object::Scalar(value))?;
        self.stack.push(obj)?;
        Ok(obj)
    }

    /// Allocates a pair from the two topmost roots and roots the pair in their place.
    ///
    /// The top of the stack becomes the tail and the entry below it the head. The operands
    /// stay rooted until the pair exists, so a cycle triggered here cannot reclaim them.
    pub fn push_pair(&mut self) -> Result<ObjRef, GcError> {
        self.stack.require(2).inspect_err(warn_stack)?;
        self.maybe_collect();
        let tail = self.stack.peek_at(0)?;
        let head = self.stack.peek_at(1)?;
        let obj = self.heap.alloc(Object::Pair { head, tail })?;
        self.stack.pop()?;
        self.stack.pop()?;
        self.stack.push(obj)?;
        Ok(obj)
    }

    /// Points the head of `pair` at `value`. This is how cyclic structures are built.
    pub fn set_head(&mut self, pair: ObjRef, value: ObjRef) -> Result<(), GcError> {
        Ok(self.heap.set_head(pair, value)?)
    }

    pub fn set_tail(&mut self, pair: ObjRef, value: ObjRef) -> Result<(), GcError> {
        Ok(self.heap.set_tail(pair, value)?)
    }

    fn maybe_collect(&mut self) {
        if self.heap.should_collect() {
            tracing::debug!(
                target: "marksweep::gc",
                live = self.heap.live_count(),
                threshold = self.heap.threshold(),
                "threshold reached, collecting before allocation"
            );
            self.collect();
        } else if self.heap.is_full() {
            tracing::debug!(
                target: "marksweep::gc",
                live = self.heap.live_count(),
                "object cap reached, collecting before allocation"
            );
            self.collect();
        }
    }

    /// Runs a full cycle now, regardless of the threshold.
    pub fn collect(&mut self) -> CollectStats {
        let stats = self.heap.collect(self.stack.as_slice());
        self.collections += 1;
        self.last_collection = Some(stats);
        tracing::info!(
            target: "marksweep::gc",
            reclaimed = stats.reclaimed,
            remaining = stats.remaining,
            threshold = stats.threshold,
            "collected {} objects, {} remaining",
            stats.reclaimed,
            stats.remaining
        );
        stats
    }

    /// Drops every root and reclaims the whole heap, returning the final record.
    pub fn destroy(mut self) -> CollectStats {
        self.release()
    }

    fn release(&mut self) -> CollectStats {
        self.stack.clear();
        let stats = self.collect();
        self.released = true;
        tracing::debug!(target: "marksweep::gc", "context released");
        stats
    }

    pub fn get(&self, obj: ObjRef) -> Result<&Object, GcError> {
        self.heap
            .get(obj)
            .ok_or_else(|| HeapError::DanglingReference { index: obj.index() }.into())
    }

    pub fn contains(&self, obj: ObjRef) -> bool {
        self.heap.contains(obj)
    }

    /// Handle of the object currently occupying slot `index`.
    pub fn resolve(&self, index: usize) -> Result<ObjRef, GcError> {
        self.heap
            .resolve(index)
            .ok_or_else(|| HeapError::DanglingReference { index }.into())
    }

    pub fn roots(&self) -> &[ObjRef] {
        self.stack.as_slice()
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn live_count(&self) -> usize {
        self.heap.live_count()
    }

    pub fn threshold(&self) -> usize {
        self.heap.threshold()
    }

    /// Number of cycles run so far, forced or threshold-triggered.
    pub fn collections(&self) -> usize {
        self.collections
    }

    pub fn last_collection(&self) -> Option<CollectStats> {
        self.last_collection
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if !self.released {
            self.release();
        }
    }
}

fn warn_stack(err: &StackError) {
    tracing::warn!(target: "marksweep::stack", error = %err, "root stack discipline violated");
}
