//! Property target bindings.
//!
//! The engine never resolves property paths itself. Callers resolve a path to
//! one of these capabilities and hand it over; the engine only ever calls
//! [`TargetBinding::write`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Where an animated value is written.
///
/// Exactly one kind is active; rebinding replaces the whole binding.
pub enum TargetBinding<T> {
    /// Plain shared slot.
    Cell(Rc<Cell<T>>),
    /// Shared slot plus a change notification fired after every write.
    Observed {
        cell: Rc<Cell<T>>,
        notify: Rc<dyn Fn()>,
    },
    /// Opaque setter.
    Setter(Rc<dyn Fn(T)>),
}

impl<T: Copy> TargetBinding<T> {
    #[must_use]
    pub fn cell(cell: Rc<Cell<T>>) -> Self {
        Self::Cell(cell)
    }

    #[must_use]
    pub fn observed(cell: Rc<Cell<T>>, notify: impl Fn() + 'static) -> Self {
        Self::Observed {
            cell,
            notify: Rc::new(notify),
        }
    }

    #[must_use]
    pub fn setter(setter: impl Fn(T) + 'static) -> Self {
        Self::Setter(Rc::new(setter))
    }

    pub fn write(&self, value: T) {
        match self {
            Self::Cell(cell) => cell.set(value),
            Self::Observed { cell, notify } => {
                cell.set(value);
                notify();
            }
            Self::Setter(setter) => setter(value),
        }
    }
}

impl<T> Clone for TargetBinding<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Cell(cell) => Self::Cell(Rc::clone(cell)),
            Self::Observed { cell, notify } => Self::Observed {
                cell: Rc::clone(cell),
                notify: Rc::clone(notify),
            },
            Self::Setter(setter) => Self::Setter(Rc::clone(setter)),
        }
    }
}

impl<T> fmt::Debug for TargetBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Cell(_) => "Cell",
            Self::Observed { .. } => "Observed",
            Self::Setter(_) => "Setter",
        };
        f.debug_tuple("TargetBinding").field(&kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_notifies_after_write() {
        let cell = Rc::new(Cell::new(0.0_f32));
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let binding = TargetBinding::observed(Rc::clone(&cell), move || seen.set(seen.get() + 1));

        binding.write(3.0);
        binding.clone().write(4.0);

        assert_eq!(cell.get(), 4.0);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn setter_receives_value() {
        let out = Rc::new(Cell::new(false));
        let sink = Rc::clone(&out);
        TargetBinding::setter(move |v: bool| sink.set(v)).write(true);
        assert!(out.get());
    }
}
