use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use foldhash::fast::FixedState;
use hashbrown::HashMap;

// -----------------------------------------------------------------------------
// NonGenericCell

/// Publish-once storage for per-type data of a non-generic type.
///
/// Used inside generated functions as a `static`:
///
/// ```
/// use vc_marshal::info::NonGenericCell;
///
/// fn answer() -> &'static u64 {
///     static CELL: NonGenericCell<u64> = NonGenericCell::new();
///     CELL.get_or_init(|| 6 * 7)
/// }
///
/// assert_eq!(*answer(), 42);
/// assert!(core::ptr::eq(answer(), answer()));
/// ```
pub struct NonGenericCell<T>(OnceLock<T>);

impl<T> NonGenericCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, building it on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericCell

type EntryMap = HashMap<TypeId, &'static (dyn Any + Send + Sync), FixedState>;

const ENTRY_HASH_STATE: FixedState = FixedState::with_seed(0x3C6E_F372_FE94_F82B);

/// Publish-once storage for per-type data of a generic type.
///
/// A `static` inside a generic function is shared by every instantiation, so
/// entries are keyed by the [`TypeId`] of the instantiated type.
///
/// The builder runs without holding any lock, so building one type's data may
/// look up another type's entry. When two callers build the same entry
/// concurrently, the first one published wins and the other result is dropped.
///
/// ```
/// use vc_marshal::info::GenericCell;
///
/// fn type_label<T: 'static>() -> &'static String {
///     static CELL: GenericCell = GenericCell::new();
///     CELL.get_or_insert::<T, String>(|| core::any::type_name::<T>().to_owned())
/// }
///
/// assert_eq!(type_label::<u8>(), "u8");
/// assert_eq!(type_label::<String>(), "alloc::string::String");
/// ```
pub struct GenericCell(RwLock<EntryMap>);

impl GenericCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(HashMap::with_hasher(ENTRY_HASH_STATE)))
    }

    /// Returns the entry stored for `K`, building it on first access.
    ///
    /// # Panics
    ///
    /// If the same cell is used for one key with two different value types.
    pub fn get_or_insert<K, V>(&self, f: impl FnOnce() -> V) -> &'static V
    where
        K: Any + ?Sized,
        V: Any + Send + Sync,
    {
        let key = TypeId::of::<K>();
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();

        let entry = match found {
            Some(entry) => entry,
            None => {
                let built = f();
                let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
                *guard
                    .entry(key)
                    .or_insert_with(|| Box::leak(Box::new(built)))
            }
        };

        entry
            .downcast_ref::<V>()
            .expect("a generic cell stores one value type per key")
    }
}

// -----------------------------------------------------------------------------
// Tests
