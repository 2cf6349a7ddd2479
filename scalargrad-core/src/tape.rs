use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::config::TapeConfig;
use crate::ops::traits::GradNumeric;
use crate::tape_data::TapeData;
use crate::value::Value;

/// Shared handle to the arena that records a computation graph.
///
/// Cloning a `Tape` is a shallow clone: both handles see the same nodes. Every
/// [`Value`] keeps its tape alive, so nodes are reclaimed once the last value
/// and tape handle referencing them are dropped.
///
/// A long-lived tape (one holding network parameters) grows with every
/// forward pass. Take a [`Checkpoint`] after recording the parameters and
/// [`truncate`](Tape::truncate) back to it once a pass is done:
///
/// ```
/// use scalargrad_core::Tape;
///
/// let tape: Tape = Tape::new();
/// let w = tape.leaf(0.5);
/// let mark = tape.checkpoint();
/// for _ in 0..3 {
///     let loss = &w * &w;
///     loss.backward();
///     w.set_data(w.data() - 0.1 * w.grad()).unwrap();
///     w.zero_grad();
///     tape.truncate(mark);
/// }
/// assert_eq!(tape.len(), 1);
/// ```
///
/// The handle is `!Send` and `!Sync`; gradient accumulation is not atomic and
/// the graph is meant to be built and differentiated on one thread.
pub struct Tape<T: GradNumeric = f64> {
    pub(crate) data: Rc<RefCell<TapeData<T>>>,
}

impl<T: GradNumeric> Tape<T> {
    /// Creates an empty tape with the default [`TapeConfig`].
    pub fn new() -> Self {
        Self::with_config(TapeConfig::default())
    }

    pub fn with_config(config: TapeConfig) -> Self {
        Tape {
            data: Rc::new(RefCell::new(TapeData::new(config))),
        }
    }

    /// Records a leaf node holding `data`.
    pub fn leaf(&self, data: T) -> Value<T> {
        let id = self.write_data().push_leaf(data);
        Value::from_parts(self.clone(), id)
    }

    pub fn config(&self) -> TapeConfig {
        self.read_data().config
    }

    /// Number of nodes recorded so far, leaves included.
    pub fn len(&self) -> usize {
        self.read_data().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks the current end of the tape.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint { len: self.len() }
    }

    /// Drops every node recorded after `checkpoint`.
    ///
    /// Nodes recorded before it, and their gradients, are untouched. Values
    /// referring to a dropped node become unusable: reading or combining them
    /// panics, even once new nodes fill the freed slots. Truncating to a
    /// checkpoint at or past the current end does nothing.
    pub fn truncate(&self, checkpoint: Checkpoint) {
        let dropped = self.write_data().truncate(checkpoint.len);
        if dropped > 0 {
            debug!("truncated tape to {} nodes ({} dropped)", checkpoint.len, dropped);
        }
    }

    /// Resets the gradient of every node on the tape to zero.
    pub fn zero_grad(&self) {
        self.write_data().zero_grad_all();
    }

    /// Whether both handles point to the same arena.
    pub fn ptr_eq(&self, other: &Tape<T>) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn read_data(&self) -> Ref<'_, TapeData<T>> {
        self.data.borrow()
    }

    pub(crate) fn write_data(&self) -> RefMut<'_, TapeData<T>> {
        self.data.borrow_mut()
    }
}

/// Position on a [`Tape`] returned by [`Tape::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint {
    len: usize,
}

impl Checkpoint {
    /// Number of nodes on the tape when the checkpoint was taken.
    pub fn len(self) -> usize {
        self.len
    }
}

impl<T: GradNumeric> Default for Tape<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GradNumeric> Clone for Tape<T> {
    fn clone(&self) -> Self {
        Tape {
            data: Rc::clone(&self.data),
        }
    }
}

impl<T: GradNumeric> fmt::Debug for Tape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tape")
            .field("len", &guard.nodes.len())
            .field("config", &guard.config)
            .finish()
    }
}
