use super::marker;
use super::sweeper;
use super::trace::{Trace, Tracer};
use crate::errors::HeapError;
use crate::runtime::value::{ObjRef, Object};

pub const INITIAL_GC_THRESHOLD: usize = 8;

#[derive(Debug)]
pub(super) struct GcBox {
    pub(super) reached: bool,
    pub(super) object: Object,
}

#[derive(Debug)]
pub(super) struct Slot {
    pub(super) generation: u32,
    pub(super) entry: Option<GcBox>,
}

/// The diagnostic record produced by every collection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub before: usize,
    pub reclaimed: usize,
    pub remaining: usize,
    /// Threshold in force after the cycle.
    pub threshold: usize,
}

/// Registry of every object allocated by one context.
///
/// Objects live in slots addressed by [`ObjRef`]. Freed slots go on a free list and are
/// reused; `live_count` always equals the number of occupied slots.
#[derive(Debug)]
pub struct Heap {
    pub(super) slots: Vec<Slot>,
    pub(super) free: Vec<usize>,
    live_count: usize,
    threshold: usize,
    initial_threshold: usize,
    max_objects: Option<usize>,
}

impl Heap {
    pub fn new(initial_threshold: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live_count: 0,
            threshold: initial_threshold,
            initial_threshold,
            max_objects: None,
        }
    }

    /// Caps the number of simultaneously live objects; allocating past it fails with
    /// [`HeapError::Exhausted`].
    pub fn with_max_objects(mut self, max_objects: Option<usize>) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Registers `object` and returns its handle. Does not consult the threshold; the
    /// caller decides whether a cycle runs first.
    pub fn alloc(&mut self, object: Object) -> Result<ObjRef, HeapError> {
        if self.is_full() {
            return Err(HeapError::Exhausted {
                live: self.live_count,
            });
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.reserve_for_new_slot()?;
                self.slots.push(Slot {
                    generation: 0,
                    entry: None,
                });
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        debug_assert!(slot.entry.is_none(), "free list returned an occupied slot");
        slot.entry = Some(GcBox {
            reached: false,
            object,
        });
        self.live_count += 1;
        Ok(ObjRef::new(index, slot.generation))
    }

    // Sweep pushes onto `free` and must never allocate, so it grows in step with `slots`.
    fn reserve_for_new_slot(&mut self) -> Result<(), HeapError> {
        let exhausted = HeapError::Exhausted {
            live: self.live_count,
        };
        self.slots.try_reserve(1).map_err(|_| exhausted.clone())?;
        let free_needed = (self.slots.len() + 1).saturating_sub(self.free.len());
        self.free.try_reserve(free_needed).map_err(|_| exhausted)?;
        Ok(())
    }

    fn entry(&self, obj: ObjRef) -> Option<&GcBox> {
        self.slots
            .get(obj.index())
            .filter(|slot| slot.generation == obj.generation())
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry_mut(&mut self, obj: ObjRef) -> Option<&mut GcBox> {
        self.slots
            .get_mut(obj.index())
            .filter(|slot| slot.generation == obj.generation())
            .and_then(|slot| slot.entry.as_mut())
    }

    pub fn get(&self, obj: ObjRef) -> Option<&Object> {
        self.entry(obj).map(|boxed| &boxed.object)
    }

    /// Redirects the head of an existing pair. `value` must be live; it may be `pair` itself.
    pub fn set_head(&mut self, pair: ObjRef, value: ObjRef) -> Result<(), HeapError> {
        *self.pair_fields_mut(pair, value)?.0 = value;
        Ok(())
    }

    pub fn set_tail(&mut self, pair: ObjRef, value: ObjRef) -> Result<(), HeapError> {
        *self.pair_fields_mut(pair, value)?.1 = value;
        Ok(())
    }

    fn pair_fields_mut(
        &mut self,
        pair: ObjRef,
        value: ObjRef,
    ) -> Result<(&mut ObjRef, &mut ObjRef), HeapError> {
        if !self.contains(value) {
            return Err(HeapError::DanglingReference {
                index: value.index(),
            });
        }
        let boxed = self.entry_mut(pair).ok_or(HeapError::DanglingReference {
            index: pair.index(),
        })?;
        match &mut boxed.object {
            Object::Pair { head, tail } => Ok((head, tail)),
            Object::Scalar(_) => Err(HeapError::NotAPair {
                index: pair.index(),
            }),
        }
    }

    pub fn contains(&self, obj: ObjRef) -> bool {
        self.entry(obj).is_some()
    }

    /// Current handle for an occupied slot, if any.
    pub fn resolve(&self, index: usize) -> Option<ObjRef> {
        let slot = self.slots.get(index)?;
        slot.entry
            .as_ref()
            .map(|_| ObjRef::new(index, slot.generation))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjRef, &Object)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry
                .as_ref()
                .map(|boxed| (ObjRef::new(index, slot.generation), &boxed.object))
        })
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn should_collect(&self) -> bool {
        self.live_count >= self.threshold
    }

    pub fn is_full(&self) -> bool {
        self.max_objects
            .is_some_and(|max_objects| self.live_count >= max_objects)
    }

    /// Runs one full stop-the-world cycle: mark from `roots`, sweep, then retune the
    /// threshold.
    pub fn collect(&mut self, roots: &[ObjRef]) -> CollectStats {
        let before = self.live_count;
        marker::mark_from_roots(self, roots);
        let reclaimed = sweeper::sweep(self);
        self.live_count -= reclaimed;
        self.threshold = if self.live_count == 0 {
            self.initial_threshold
        } else {
            self.live_count * 2
        };
        CollectStats {
            before,
            reclaimed,
            remaining: self.live_count,
            threshold: self.threshold,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_marked(&self, obj: ObjRef) -> bool {
        self.entry(obj).is_some_and(|boxed| boxed.reached)
    }

    /// Sets the reached flag. Returns `false` if the object was already reached or is not
    /// live, which is what keeps tracing from looping on cycles.
    pub(crate) fn mark(&mut self, obj: ObjRef) -> bool {
        match self.entry_mut(obj) {
            Some(boxed) if !boxed.reached => {
                boxed.reached = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn trace_object(&self, obj: ObjRef, tracer: &mut Tracer) {
        if let Some(boxed) = self.entry(obj) {
            boxed.object.trace(tracer);
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(INITIAL_GC_THRESHOLD)
    }
}
