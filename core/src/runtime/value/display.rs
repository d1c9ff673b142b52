use super::{ObjRef, Object, ObjectKind};
use std::fmt;

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Scalar(value) => write!(f, "{value}"),
            Object::Pair { head, tail } => write!(f, "({head}, {tail})"),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Scalar => write!(f, "int"),
            ObjectKind::Pair => write!(f, "pair"),
        }
    }
}
