use super::heap::Heap;

/// Frees every unreached object in one pass over the slots and clears the flag on the
/// survivors. Returns how many objects were freed; the caller adjusts the live count.
///
/// A slot whose generation cannot advance any further is retired instead of going back on
/// the free list, so no handle ever names two different objects.
pub fn sweep(heap: &mut Heap) -> usize {
    let mut freed = 0;
    for (index, slot) in heap.slots.iter_mut().enumerate() {
        let Some(boxed) = slot.entry.as_mut() else {
            continue;
        };
        if boxed.reached {
            boxed.reached = false;
            continue;
        }
        slot.entry = None;
        freed += 1;
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            heap.free.push(index);
        }
    }
    freed
}

#[cfg(test)]
mod tests {
    use super::super::marker::mark_from_roots;
    use super::*;
    use crate::runtime::value::Object;

    #[test]
    fn survivors_are_unmarked_after_sweep() {
        let mut heap = Heap::default();
        let kept = heap.alloc(Object::Scalar(1)).expect("alloc");
        let dropped = heap.alloc(Object::Scalar(2)).expect("alloc");

        mark_from_roots(&mut heap, &[kept]);
        let freed = sweep(&mut heap);

        assert_eq!(freed, 1);
        assert!(heap.contains(kept));
        assert!(!heap.is_marked(kept));
        assert!(!heap.contains(dropped));
    }

    #[test]
    fn exhausted_generation_retires_the_slot() {
        let mut heap = Heap::default();
        let first = heap.alloc(Object::Scalar(1)).expect("alloc");
        heap.slots[first.index()].generation = u32::MAX;
        let stale = heap.resolve(first.index()).expect("occupied");

        assert_eq!(sweep(&mut heap), 1);
        assert!(!heap.free.contains(&first.index()));

        let next = heap.alloc(Object::Scalar(2)).expect("alloc");
        assert_ne!(next.index(), first.index());
        assert!(!heap.contains(stale));
    }

    #[test]
    fn sweeping_twice_frees_nothing_new() {
        let mut heap = Heap::default();
        heap.alloc(Object::Scalar(1)).expect("alloc");
        assert_eq!(sweep(&mut heap), 1);
        assert_eq!(sweep(&mut heap), 0);
    }
}
