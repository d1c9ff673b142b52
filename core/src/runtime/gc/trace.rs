use crate::runtime::value::{ObjRef, Object};

/// Reports the handles an object holds so the marker can follow them.
pub trait Trace {
    fn trace(&self, tracer: &mut Tracer);
}

#[derive(Default)]
pub struct Tracer {
    discovered: Vec<ObjRef>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, obj: ObjRef) {
        self.discovered.push(obj);
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, ObjRef> {
        self.discovered.drain(..)
    }
}

impl Trace for ObjRef {
    fn trace(&self, tracer: &mut Tracer) {
        tracer.mark(*self);
    }
}

impl Trace for Object {
    fn trace(&self, tracer: &mut Tracer) {
        match self {
            Object::Scalar(_) => {}
            Object::Pair { head, tail } => {
                tail.trace(tracer);
                head.trace(tracer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reports_nothing() {
        let mut tracer = Tracer::new();
        Object::Scalar(3).trace(&mut tracer);
        assert_eq!(tracer.drain().count(), 0);
    }

    #[test]
    fn pair_reports_both_children() {
        let head = ObjRef::new(0, 0);
        let tail = ObjRef::new(1, 0);
        let mut tracer = Tracer::new();
        Object::Pair { head, tail }.trace(&mut tracer);
        let found: Vec<_> = tracer.drain().collect();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&head));
        assert!(found.contains(&tail));
    }
}
