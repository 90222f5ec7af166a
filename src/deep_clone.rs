//! Deep copies that keep shared values shared.
//!
//! [`Clone`] on an [`OrderedMap`] clones every value, so an `Rc` in the map
//! still points at the original allocation afterwards. [`DeepClone`] copies
//! the allocation behind every `Rc` too, exactly once: two entries sharing
//! one allocation share one copy, and `Weak` references into the copied
//! graph are redirected to the copies.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::rc::Weak;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::any::TypeId;
use core::cell::Cell;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::ordered_map::OrderedMap;
use crate::store::NodeStore;

#[cold]
#[inline(never)]
fn strong_cycle() -> ! {
    panic!(
        "deep_clone reached an Rc that is still being copied: strong Rc cycles cannot be rebuilt, use Weak for back-references"
    );
}

enum Slot<T> {
    Copying(Weak<T>),
    Copied(Rc<T>),
}

/// Records the copy made for every `Rc` allocation during one deep clone.
///
/// Copies stay alive at least as long as the memo.
#[derive(Default)]
pub struct CloneMemo {
    copies: HashMap<(usize, TypeId), Box<dyn Any>>,
}

impl CloneMemo {
    /// Creates an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocations copied so far.
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    /// Returns `true` if nothing has been copied yet.
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    fn slot<T: 'static>(&self, address: usize) -> Option<&Slot<T>> {
        self.copies
            .get(&(address, TypeId::of::<T>()))
            .and_then(|slot| slot.downcast_ref::<Slot<T>>())
    }

    fn record<T: 'static>(&mut self, address: usize, slot: Slot<T>) {
        self.copies
            .insert((address, TypeId::of::<T>()), Box::new(slot));
    }
}

impl fmt::Debug for CloneMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloneMemo")
            .field("copies", &self.copies.len())
            .finish()
    }
}

fn address<T>(rc: &Rc<T>) -> usize {
    Rc::as_ptr(rc) as *const () as usize
}

/// Recursive copy that preserves the sharing structure of `Rc` graphs.
///
/// Implement [`deep_clone_with`](DeepClone::deep_clone_with) by deep cloning
/// every field with the same memo.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use odict::DeepClone;
/// use odict::OrderedMap;
///
/// let shared = Rc::new(RefCell::new(vec![1]));
/// let map = OrderedMap::from([("a", shared.clone()), ("b", shared)]);
///
/// let copy = map.deep_clone();
/// copy[&"a"].borrow_mut().push(2);
///
/// assert_eq!(*copy[&"b"].borrow(), [1, 2]);
/// assert_eq!(*map[&"a"].borrow(), [1]);
/// ```
pub trait DeepClone: Sized {
    /// Copies `self`, consulting and filling `memo` for shared allocations.
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self;

    /// Copies `self` with a fresh memo.
    fn deep_clone(&self) -> Self {
        self.deep_clone_with(&mut CloneMemo::new())
    }
}

macro_rules! deep_clone_by_clone {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepClone for $ty {
                #[inline]
                fn deep_clone_with(&self, _memo: &mut CloneMemo) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

deep_clone_by_clone!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

macro_rules! deep_clone_tuple {
    ($($name:ident),+) => {
        impl<$($name: DeepClone),+> DeepClone for ($($name,)+) {
            #[allow(non_snake_case)]
            fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
                let ($($name,)+) = self;
                ($($name.deep_clone_with(memo),)+)
            }
        }
    };
}

deep_clone_tuple!(A);
deep_clone_tuple!(A, B);
deep_clone_tuple!(A, B, C);
deep_clone_tuple!(A, B, C, D);

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        self.as_ref().map(|value| value.deep_clone_with(memo))
    }
}

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        self.iter().map(|value| value.deep_clone_with(memo)).collect()
    }
}

impl<T: DeepClone> DeepClone for Box<T> {
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        Box::new((**self).deep_clone_with(memo))
    }
}

impl<T: DeepClone> DeepClone for RefCell<T> {
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        RefCell::new(self.borrow().deep_clone_with(memo))
    }
}

impl<T: Copy> DeepClone for Cell<T> {
    fn deep_clone_with(&self, _memo: &mut CloneMemo) -> Self {
        Cell::new(self.get())
    }
}

/// Copies the allocation once per memo.
///
/// # Panics
///
/// If the allocation is reachable from itself through strong `Rc`s only.
/// Such a cycle leaks in the original too; back-references must be `Weak`.
impl<T: DeepClone + 'static> DeepClone for Rc<T> {
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        let address = address(self);
        match memo.slot::<T>(address) {
            Some(Slot::Copied(copy)) => return copy.clone(),
            Some(Slot::Copying(_)) => strong_cycle(),
            None => {}
        }
        let copy = Rc::new_cyclic(|weak| {
            memo.record(address, Slot::Copying(weak.clone()));
            (**self).deep_clone_with(memo)
        });
        memo.record(address, Slot::Copied(copy.clone()));
        copy
    }
}

/// Points at the copy of the target allocation, copying it first if needed.
/// A dangling `Weak` stays dangling.
impl<T: DeepClone + 'static> DeepClone for Weak<T> {
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        let Some(target) = self.upgrade() else {
            return Weak::new();
        };
        match memo.slot::<T>(address(&target)) {
            Some(Slot::Copied(copy)) => Rc::downgrade(copy),
            Some(Slot::Copying(weak)) => weak.clone(),
            None => Rc::downgrade(&target.deep_clone_with(memo)),
        }
    }
}

/// Copies every value in order; keys are cloned.
impl<K, V, M> DeepClone for OrderedMap<K, V, M>
where
    K: Clone + Eq,
    V: DeepClone,
    M: NodeStore<K, V>,
{
    fn deep_clone_with(&self, memo: &mut CloneMemo) -> Self {
        let mut copy = Self::with_capacity(self.len());
        for (key, value) in self.iter() {
            copy.insert(key.clone(), value.deep_clone_with(memo));
        }
        copy
    }
}
