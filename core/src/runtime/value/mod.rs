mod display;

/// Handle to an object living in a [`Heap`](crate::runtime::gc::Heap).
///
/// A handle is a slot index plus the generation of that slot at allocation time. Sweeping
/// bumps the generation of every freed slot, so a handle that outlived its object never
/// aliases whatever is allocated into the slot next. A slot whose generation reaches
/// `u32::MAX` is freed one last time and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef {
    index: usize,
    generation: u32,
}

impl ObjRef {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Scalar,
    Pair,
}

/// A heap object: either an integer or a pair of references.
///
/// Pairs may point at themselves or at each other; reachability alone decides how long
/// an object lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    Scalar(i32),
    Pair { head: ObjRef, tail: ObjRef },
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Scalar(_) => ObjectKind::Scalar,
            Object::Pair { .. } => ObjectKind::Pair,
        }
    }

    pub fn as_scalar(&self) -> Option<i32> {
        match self {
            Object::Scalar(value) => Some(*value),
            Object::Pair { .. } => None,
        }
    }

    pub fn as_pair(&self) -> Option<(ObjRef, ObjRef)> {
        match self {
            Object::Pair { head, tail } => Some((*head, *tail)),
            Object::Scalar(_) => None,
        }
    }
}
