//! SymTableHash: chained hash table that grows through a fixed capacity
//! schedule.
//!
//! Growth is checked before each insertion of a new binding: once the number
//! of bindings exceeds the number of buckets, the table moves to the next
//! bucket count in its [`Schedule`]. Rehashing relinks the existing boxed
//! bindings into a freshly allocated bucket array; no binding is cloned or
//! reallocated. If the new array cannot be allocated the table keeps its
//! current buckets and the insertion proceeds.

use crate::binding::{self, Binding, Chain};
use crate::hash::bucket_index;
use crate::schedule::Schedule;
use crate::table::{AllocError, PutError, SymTable};
use core::fmt;
use log::{debug, warn};
use std::collections::TryReserveError;

pub struct SymTableHash<'a, V: ?Sized> {
    buckets: Vec<Chain<'a, V>>,
    len: usize,
    schedule: Schedule,
}

/// Allocate `count` empty chains, reporting exhaustion instead of aborting.
fn alloc_buckets<'a, V: ?Sized>(count: usize) -> Result<Vec<Chain<'a, V>>, TryReserveError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(count)?;
    buckets.resize_with(count, Chain::new);
    Ok(buckets)
}

impl<'a, V: ?Sized> SymTableHash<'a, V> {
    pub fn new() -> Self {
        Self::with_schedule(Schedule::DEFAULT)
    }

    /// Create an empty table starting at `schedule.initial()` buckets.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the initial bucket array would
    /// exceed `isize::MAX` bytes. Use [`SymTableHash::try_with_schedule`] to
    /// get an `AllocError` instead.
    pub fn with_schedule(schedule: Schedule) -> Self {
        let count = schedule.initial();
        let mut buckets = Vec::with_capacity(count);
        buckets.resize_with(count, Chain::new);
        Self {
            buckets,
            len: 0,
            schedule,
        }
    }

    pub fn try_with_schedule(schedule: Schedule) -> Result<Self, AllocError> {
        let buckets = alloc_buckets(schedule.initial()).map_err(|_| AllocError)?;
        Ok(Self {
            buckets,
            len: 0,
            schedule,
        })
    }

    /// Current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Bindings in bucket-index order, and head to tail within a bucket.
    pub fn iter(&self) -> Iter<'_, 'a, V> {
        let mut buckets = self.buckets.iter();
        let chain = buckets.next().map(Chain::iter);
        Iter { buckets, chain }
    }

    fn chain(&self, key: &str) -> &Chain<'a, V> {
        &self.buckets[bucket_index(key, self.buckets.len())]
    }

    fn chain_mut(&mut self, key: &str) -> &mut Chain<'a, V> {
        let idx = bucket_index(key, self.buckets.len());
        &mut self.buckets[idx]
    }

    fn should_grow(&self) -> bool {
        self.len > self.buckets.len() && self.buckets.len() < self.schedule.largest()
    }

    /// Move every binding into a bucket array of the next scheduled size.
    /// Leaves the table untouched if that array cannot be allocated.
    fn grow(&mut self) {
        let old_count = self.buckets.len();
        let Some(new_count) = self.schedule.next_after(old_count) else {
            return;
        };
        let mut fresh = match alloc_buckets(new_count) {
            Ok(fresh) => fresh,
            Err(err) => {
                warn!(
                    "symtable: growth from {} to {} buckets abandoned: {}",
                    old_count, new_count, err
                );
                return;
            }
        };
        for chain in &mut self.buckets {
            while let Some(node) = chain.pop_front() {
                let idx = bucket_index(node.key(), new_count);
                fresh[idx].push_front(node);
            }
        }
        self.buckets = fresh;
        debug!(
            "symtable: grew from {} to {} buckets at {} bindings",
            old_count, new_count, self.len
        );
    }

    #[cfg(test)]
    pub(crate) fn assert_placement(&self) {
        let count = self.buckets.len();
        let mut total = 0;
        for (idx, chain) in self.buckets.iter().enumerate() {
            for (key, _) in chain.iter() {
                assert_eq!(
                    bucket_index(key, count),
                    idx,
                    "key {:?} sits in the wrong bucket",
                    key
                );
                total += 1;
            }
        }
        assert_eq!(total, self.len, "length out of sync with chains");
    }
}

impl<'a, V: ?Sized> Default for SymTableHash<'a, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V: ?Sized + 'a> SymTable<'a, V> for SymTableHash<'a, V> {
    fn try_new() -> Result<Self, AllocError> {
        Self::try_with_schedule(Schedule::DEFAULT)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn put(&mut self, key: &str, value: &'a V) -> Result<(), PutError> {
        if self.chain(key).contains(key) {
            return Err(PutError::DuplicateKey);
        }
        if self.should_grow() {
            self.grow();
        }
        let node = Binding::new(key, value).map_err(|err| {
            warn!("symtable: cannot copy key of {} bytes: {}", key.len(), err);
            PutError::OutOfMemory
        })?;
        self.chain_mut(key).push_front(node);
        self.len += 1;
        Ok(())
    }

    fn replace(&mut self, key: &str, value: &'a V) -> Option<&'a V> {
        self.chain_mut(key)
            .find_mut(key)
            .map(|node| node.replace_value(value))
    }

    fn contains(&self, key: &str) -> bool {
        self.chain(key).contains(key)
    }

    fn get(&self, key: &str) -> Option<&'a V> {
        self.chain(key).find(key).map(Binding::value)
    }

    fn remove(&mut self, key: &str) -> Option<&'a V> {
        let node = self.chain_mut(key).unlink(key)?;
        self.len -= 1;
        Some(node.value())
    }

    fn map<C, F>(&self, mut apply: F, extra: &mut C)
    where
        C: ?Sized,
        F: FnMut(&str, &'a V, &mut C),
    {
        for (key, value) in self.iter() {
            apply(key, value, extra);
        }
    }
}

/// Iterator over all bindings of a [`SymTableHash`].
pub struct Iter<'t, 'a, V: ?Sized> {
    buckets: core::slice::Iter<'t, Chain<'a, V>>,
    chain: Option<binding::Iter<'t, 'a, V>>,
}

impl<'t, 'a, V: ?Sized> Iterator for Iter<'t, 'a, V> {
    type Item = (&'t str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.as_mut()?.next() {
                return Some(item);
            }
            self.chain = self.buckets.next().map(Chain::iter);
        }
    }
}

impl<'t, 'a, V: ?Sized> IntoIterator for &'t SymTableHash<'a, V> {
    type Item = (&'t str, &'a V);
    type IntoIter = Iter<'t, 'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V: ?Sized + fmt::Debug> fmt::Debug for SymTableHash<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
