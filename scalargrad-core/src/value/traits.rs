// src/value/traits.rs

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Value;
use crate::ops::traits::GradNumeric;

impl<T: GradNumeric> Clone for Value<T> {
    /// Shallow clone: the new handle refers to the same node.
    fn clone(&self) -> Self {
        Value {
            tape: self.tape.clone(),
            id: self.id,
            epoch: self.epoch,
        }
    }
}

impl<T: GradNumeric> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value(data={})", self.data())
    }
}

impl<T: GradNumeric> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.tape.read_data();
        let node = guard.live_node(self.id, self.epoch);
        let mut s = f.debug_struct("Value");
        s.field("id", &self.id)
            .field("data", &node.data)
            .field("grad", &node.grad);
        match node.grad_fn {
            Some(op) => s.field("op", &op.kind()),
            None => s.field("op", &"leaf"),
        };
        s.finish()
    }
}

impl<T: GradNumeric> PartialEq for Value<T> {
    /// Identity comparison, never a comparison of `data`.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: GradNumeric> Eq for Value<T> {}

impl<T: GradNumeric> Hash for Value<T> {
    /// Hashes the tape address and the node index.
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.tape.data).hash(state);
        self.id.hash(state);
        self.epoch.hash(state);
    }
}
