//! `ObjectPool`: A bounded cache of reusable instances.
//!
//! The pool keeps hot-path code from allocating: objects handed back with
//! [`ObjectPool::release`] are returned by later calls to
//! [`ObjectPool::acquire`] instead of building fresh ones.
//!
//! The pool is not synchronized. Owners that share it across threads keep it
//! behind their own lock.

use crate::error::ConfigError;

/// A fixed-capacity store of free instances plus a factory for new ones.
pub struct ObjectPool<T, F = fn() -> T> {
    /// Free instances, most recently released last.
    free: Vec<T>,
    /// Builds a new instance when the free store is empty.
    factory: F,
    /// Maximum number of free instances retained.
    capacity: usize,
}

impl<T, F> ObjectPool<T, F>
where
    F: Fn() -> T,
{
    /// Create an empty pool.
    ///
    /// The free store is allocated up front so `release` never grows it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPoolCapacity`] if `capacity` is zero.
    pub fn new(factory: F, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroPoolCapacity);
        }
        Ok(Self {
            free: Vec::with_capacity(capacity),
            factory,
            capacity,
        })
    }

    /// Take an instance out of the pool, building one if none is free.
    ///
    /// Released instances come back in LIFO order and keep whatever state
    /// they had when released; callers overwrite the fields they use.
    #[inline]
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(object) => object,
            None => (self.factory)(),
        }
    }

    /// Hand an instance back.
    ///
    /// Once the store holds `capacity` instances the object is dropped.
    #[inline]
    pub fn release(&mut self, object: T) {
        if self.free.len() < self.capacity {
            self.free.push(object);
        }
    }

    /// Number of instances currently waiting to be reused.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Maximum number of free instances retained.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T, F> std::fmt::Debug for ObjectPool<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("free", &self.free.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn boxed_pool(capacity: usize) -> ObjectPool<Box<u32>> {
        ObjectPool::new((|| Box::new(0)) as fn() -> Box<u32>, capacity).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = ObjectPool::new(|| 0u8, 0);
        assert!(matches!(result, Err(ConfigError::ZeroPoolCapacity)));
    }

    #[test]
    fn test_acquire_builds_when_empty() {
        let built = Cell::new(0);
        let mut pool = ObjectPool::new(
            || {
                built.set(built.get() + 1);
                Box::new(7u32)
            },
            4,
        )
        .unwrap();

        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(*a, 7);
        assert_eq!(*b, 7);
        assert_eq!(built.get(), 2);
    }

    #[test]
    fn test_acquire_reuses_released() {
        let mut pool = boxed_pool(4);
        let mut object = pool.acquire();
        *object = 42;
        let address = std::ptr::addr_of!(*object);
        pool.release(object);

        let again = pool.acquire();
        assert_eq!(std::ptr::addr_of!(*again), address);
        assert_eq!(*again, 42);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn test_release_acquire_keeps_size() {
        let mut pool = boxed_pool(4);
        pool.release(Box::new(1));
        pool.release(Box::new(2));
        let before = pool.free_len();

        let object = pool.acquire();
        pool.release(object);
        assert_eq!(pool.free_len(), before);
    }

    #[test]
    fn test_release_is_bounded() {
        let mut pool = boxed_pool(3);
        for i in 0..(3 + 5) {
            pool.release(Box::new(i));
        }
        assert_eq!(pool.free_len(), 3);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn test_acquired_objects_are_distinct() {
        let mut pool = boxed_pool(8);
        for i in 0..8 {
            pool.release(Box::new(i));
        }
        let held: Vec<_> = (0..8).map(|_| pool.acquire()).collect();
        let mut values: Vec<u32> = held.iter().map(|b| **b).collect();
        values.sort_unstable();
        assert_eq!(values, (0..8).collect::<Vec<_>>());
    }
}
