use core::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::Hash,
    mem,
};

use crate::Slot;

/// The error returned when a checked accessor is called on an [`Optional`] that holds no value.
#[derive(Debug)]
pub struct BadAccess;

#[cfg(feature = "std")]
impl std::error::Error for BadAccess {}

impl Display for BadAccess {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BadAccess")
    }
}

/// A marker for the absence of a value, comparable against any [`Optional`] regardless of the
/// contained type.
///
/// An optional holding no value compares equal to the marker; an optional holding a value
/// compares strictly greater than it. The marker takes the left-hand side (`NO_VALUE == opt`);
/// the mirrored operand order would collide with the bare-value comparisons under coherence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoValue;

/// The single "no value" marker. [`Optional::none`] compares equal to it.
pub const NO_VALUE: NoValue = NoValue;

/// A container holding either one value of type `T` or nothing.
///
/// The value lives in correctly aligned storage embedded directly in the container, so no heap
/// allocation ever takes place, and `T` does not need a default value for the empty state to
/// exist. The `engaged` flag and the liveness of the value in the slot agree at every point a
/// public method can observe.
///
/// ## Example
/// ```
/// # use optional::Optional;
/// let mut opt = Optional::none();
/// assert!(!opt.has_value());
///
/// opt.set(String::from("occupied"));
/// assert_eq!("occupied", *opt.value());
/// ```
pub struct Optional<T> {
    engaged: bool,
    slot: Slot<T>,
}

impl<T> Optional<T> {
    /// Construct a new `Optional` that holds no value.
    pub const fn none() -> Self {
        Self {
            engaged: false,
            slot: Slot::uninit(),
        }
    }

    /// Construct a new `Optional` that holds the given value.
    ///
    /// ## Example
    /// ```
    /// # use optional::Optional;
    /// let opt = Optional::some(42);
    /// assert!(opt.has_value());
    /// assert_eq!(42, *opt.value());
    /// ```
    pub const fn some(value: T) -> Self {
        Self {
            engaged: true,
            slot: Slot::new(value),
        }
    }

    /// Whether this optional currently holds a value.
    pub const fn has_value(&self) -> bool {
        self.engaged
    }

    /// Get a shared reference to the contained value, or [`BadAccess`] if there is none.
    ///
    /// ## Example
    /// ```
    /// # use optional::Optional;
    /// let opt = Optional::some(42);
    /// assert_eq!(42, *opt.try_value().expect("the optional holds a value"));
    ///
    /// let empty = Optional::<i32>::none();
    /// assert!(empty.try_value().is_err());
    /// ```
    pub fn try_value(&self) -> Result<&T, BadAccess> {
        if self.engaged {
            // SAFETY: The flag says a value is live in the slot.
            Ok(unsafe { self.slot.get() })
        } else {
            Err(BadAccess)
        }
    }

    /// Get a mutable reference to the contained value, or [`BadAccess`] if there is none.
    /// Mutating through the reference never empties the optional.
    pub fn try_value_mut(&mut self) -> Result<&mut T, BadAccess> {
        if self.engaged {
            // SAFETY: The flag says a value is live in the slot.
            Ok(unsafe { self.slot.get_mut() })
        } else {
            Err(BadAccess)
        }
    }

    /// Get a shared reference to the contained value.
    ///
    /// ## Panics
    /// This method panics if the optional holds no value.
    pub fn value(&self) -> &T {
        self.try_value().expect("optional should hold a value")
    }

    /// Get a mutable reference to the contained value.
    ///
    /// ## Panics
    /// This method panics if the optional holds no value.
    pub fn value_mut(&mut self) -> &mut T {
        self.try_value_mut().expect("optional should hold a value")
    }

    /// Get a shared reference to the contained value without checking that one is present.
    ///
    /// ## Safety
    /// The caller must ensure that this optional holds a value.
    pub unsafe fn value_unchecked(&self) -> &T {
        // SAFETY: The caller has ensured that a value is live in the slot.
        unsafe { self.slot.get() }
    }

    /// Get a mutable reference to the contained value without checking that one is present.
    ///
    /// ## Safety
    /// The caller must ensure that this optional holds a value.
    pub unsafe fn value_unchecked_mut(&mut self) -> &mut T {
        // SAFETY: The caller has ensured that a value is live in the slot.
        unsafe { self.slot.get_mut() }
    }

    /// Get a raw pointer to the storage for the contained value. The pointer is never null and
    /// always correctly aligned.
    ///
    /// **Caution:** Reading through the returned pointer is only defined while the optional holds
    /// a value.
    pub const fn as_ptr(&self) -> *const T {
        self.slot.as_ptr()
    }

    /// Get a raw pointer to the storage for the contained value. The pointer is never null and
    /// always correctly aligned.
    ///
    /// **Caution:** Reading or dropping through the returned pointer is only defined while the
    /// optional holds a value; writing through it must not overwrite a live value the optional
    /// still expects to destroy.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slot.as_mut_ptr()
    }

    /// View the contained value as a standard [`Option`] of a shared reference.
    ///
    /// ## Example
    /// ```
    /// # use optional::Optional;
    /// let opt = Optional::some(42);
    /// assert_eq!(Some(&42), opt.as_option());
    /// assert_eq!(None, Optional::<i32>::none().as_option());
    /// ```
    pub fn as_option(&self) -> Option<&T> {
        if self.engaged {
            // SAFETY: The flag says a value is live in the slot.
            Some(unsafe { self.slot.get() })
        } else {
            None
        }
    }

    /// View the contained value as a standard [`Option`] of a mutable reference.
    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        if self.engaged {
            // SAFETY: The flag says a value is live in the slot.
            Some(unsafe { self.slot.get_mut() })
        } else {
            None
        }
    }

    /// Construct an `Optional` from a standard [`Option`], holding a value exactly when the
    /// option does.
    ///
    /// ## Why is this not an `impl From<Option<T>>`?
    /// Such an impl would overlap with the value conversion `impl From<T>` for the case where
    /// `T` is itself an option, so the bridge is a named constructor instead.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::some(value),
            None => Self::none(),
        }
    }

    /// Consume this optional and return the contained value as a standard [`Option`].
    pub fn into_option(mut self) -> Option<T> {
        self.take()
    }

    /// Destroy the contained value, if any. The optional holds no value afterwards; calling this
    /// on an optional that already holds no value has no effect.
    ///
    /// ## Example
    /// ```
    /// # use optional::Optional;
    /// let mut opt = Optional::some(42);
    /// opt.reset();
    /// assert!(!opt.has_value());
    /// ```
    pub fn reset(&mut self) {
        if self.engaged {
            self.destruct_value();
        }
    }

    /// Store the given value. If a value is already held, it is assigned to the existing object;
    /// otherwise the value is placed into the empty storage. The optional holds a value
    /// afterwards in either case.
    pub fn set(&mut self, value: T) {
        if self.engaged {
            // SAFETY: The flag says a value is live in the slot.
            let current = unsafe { self.slot.get_mut() };
            *current = value;
        } else {
            self.construct_value(value);
        }
    }

    /// Move the contained value out, leaving the optional empty.
    ///
    /// ## Example
    /// ```
    /// # use optional::Optional;
    /// let mut opt = Optional::some(42);
    /// assert_eq!(Some(42), opt.take());
    /// assert_eq!(None, opt.take());
    /// ```
    pub fn take(&mut self) -> Option<T> {
        if self.engaged {
            self.engaged = false;
            // SAFETY: The flag said a value was live; it was cleared just above, so nothing reads
            // or drops the slot again until the next write.
            Some(unsafe { self.slot.take() })
        } else {
            None
        }
    }

    /// Store the given value and return the previously contained value, if any.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let previous = self.take();
        self.construct_value(value);
        previous
    }

    /// Exchange the contents of two optionals. If both hold a value, the values themselves are
    /// exchanged in place; if only one does, its value moves to the other side and the states
    /// flip; if neither does, nothing happens.
    ///
    /// ## Example
    /// ```
    /// # use optional::Optional;
    /// let mut a = Optional::none();
    /// let mut b = Optional::some(7);
    /// a.swap(&mut b);
    /// assert!(!b.has_value());
    /// assert_eq!(7, *a.value());
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        if self.engaged && other.engaged {
            // SAFETY: Both flags say a value is live in the respective slot.
            unsafe { mem::swap(self.slot.get_mut(), other.slot.get_mut()) };
        } else if self.engaged {
            self.engaged = false;
            // SAFETY: The flag said a value was live; it was cleared just above, so the move
            // leaves the value with exactly one owner.
            let value = unsafe { self.slot.take() };
            other.construct_value(value);
        } else if other.engaged {
            other.swap(self);
        }
    }

    // Construction and destruction of the contained value. Everything that flips the state goes
    // through these two, which keep the flag and the liveness of the slot in agreement.

    fn construct_value(&mut self, value: T) {
        debug_assert!(!self.engaged);
        self.slot.write(value);
        self.engaged = true;
    }

    fn destruct_value(&mut self) {
        debug_assert!(self.engaged);
        // clear the flag first so a panicking destructor cannot lead to a second drop
        self.engaged = false;
        // SAFETY: The flag said a value was live, and it was cleared just above.
        unsafe { self.slot.drop_in_place() };
    }
}

// trait implementations

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> Drop for Optional<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::some(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(value) => Self::some(value.clone()),
            None => Self::none(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match (self.engaged, source.as_option()) {
            // assign through to the existing object rather than destroying and reconstructing
            (true, Some(value)) => {
                // SAFETY: The flag says a value is live in the slot.
                unsafe { self.slot.get_mut() }.clone_from(value);
            }
            (false, Some(value)) => self.construct_value(value.clone()),
            (true, None) => self.destruct_value(),
            (false, None) => {}
        }
    }
}

impl<T: Debug> Debug for Optional<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Optional").field(value).finish(),
            None => f.debug_tuple("Optional").field(&NoValue).finish(),
        }
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Optional<T> {}

// An optional holding no value sorts strictly before every optional holding one, and two
// optionals holding values compare by those values. Delegating to `Option<&T>` encodes exactly
// that table.
impl<T: PartialOrd> PartialOrd for Optional<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option().partial_cmp(&other.as_option())
    }
}

impl<T: Ord> Ord for Optional<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_option().cmp(&other.as_option())
    }
}

// Comparisons against a bare value, as if it were wrapped, without actually wrapping (or cloning)
// it. Coherence does not permit the mirrored `T == Optional<T>` form for arbitrary `T`, so these
// are one-directional.
impl<T: PartialEq> PartialEq<T> for Optional<T> {
    fn eq(&self, other: &T) -> bool {
        match self.as_option() {
            Some(value) => value == other,
            None => false,
        }
    }
}

impl<T: PartialOrd> PartialOrd<T> for Optional<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        match self.as_option() {
            Some(value) => value.partial_cmp(other),
            None => Some(Ordering::Less),
        }
    }
}

// The marker compares from the left-hand side only: a mirrored `PartialEq<NoValue>` impl on
// `Optional<T>` would overlap with the bare-value impl above for `T = NoValue`.
impl<T> PartialEq<Optional<T>> for NoValue {
    fn eq(&self, other: &Optional<T>) -> bool {
        !other.engaged
    }
}

impl<T> PartialOrd<Optional<T>> for NoValue {
    fn partial_cmp(&self, other: &Optional<T>) -> Option<Ordering> {
        if other.engaged {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Equal)
        }
    }
}

impl<T: Hash> Hash for Optional<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_option().hash(state);
    }
}
