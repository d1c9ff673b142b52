use super::heap::Heap;
use super::trace::Tracer;
use crate::runtime::value::ObjRef;

/// Flags everything reachable from `roots`.
///
/// Uses an explicit worklist, so the depth of the object graph never touches the call
/// stack. An object is pushed at most once per cycle: `Heap::mark` refuses objects that
/// are already reached.
pub fn mark_from_roots(heap: &mut Heap, roots: &[ObjRef]) {
    let mut worklist = Vec::with_capacity(roots.len());

    for &root in roots {
        if heap.mark(root) {
            worklist.push(root);
        }
    }

    let mut tracer = Tracer::new();
    while let Some(obj) = worklist.pop() {
        heap.trace_object(obj, &mut tracer);
        for child in tracer.drain() {
            if heap.mark(child) {
                worklist.push(child);
            }
        }
    }
}
