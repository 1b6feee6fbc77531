//! Binding: a single key/value entry and the singly-linked chains built from it.
//!
//! A chain owns its bindings through `Option<Box<_>>` links. Nodes are only
//! ever moved between chains (push/pop at the head), never cloned, so a
//! binding keeps its allocation for its whole life in the table.

use std::collections::TryReserveError;

type Link<'a, V> = Option<Box<Binding<'a, V>>>;

pub(crate) struct Binding<'a, V: ?Sized> {
    key: Box<str>,
    value: &'a V,
    next: Link<'a, V>,
}

/// Copy `key` into a fresh allocation owned by the table.
///
/// The allocation goes through `try_reserve_exact` so exhaustion surfaces
/// as an error instead of an abort.
pub(crate) fn copy_key(key: &str) -> Result<Box<str>, TryReserveError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

impl<'a, V: ?Sized> Binding<'a, V> {
    /// Build an unlinked binding holding a private copy of `key`.
    pub(crate) fn new(key: &str, value: &'a V) -> Result<Box<Self>, TryReserveError> {
        let key = copy_key(key)?;
        Ok(Box::new(Self {
            key,
            value,
            next: None,
        }))
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn value(&self) -> &'a V {
        self.value
    }

    /// Install a new value reference and hand back the previous one.
    pub(crate) fn replace_value(&mut self, value: &'a V) -> &'a V {
        core::mem::replace(&mut self.value, value)
    }
}

/// Singly-linked chain of bindings with head insertion.
pub(crate) struct Chain<'a, V: ?Sized> {
    head: Link<'a, V>,
}

impl<'a, V: ?Sized> Chain<'a, V> {
    pub(crate) const fn new() -> Self {
        Self { head: None }
    }

    pub(crate) fn push_front(&mut self, mut node: Box<Binding<'a, V>>) {
        debug_assert!(node.next.is_none(), "pushed binding must be unlinked");
        node.next = self.head.take();
        self.head = Some(node);
    }

    /// Detach the head binding; the returned node is unlinked.
    pub(crate) fn pop_front(&mut self) -> Option<Box<Binding<'a, V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    pub(crate) fn find(&self, key: &str) -> Option<&Binding<'a, V>> {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if node.key() == key {
                return Some(node);
            }
            cur = node.next.as_deref();
        }
        None
    }

    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Binding<'a, V>> {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if node.key() == key {
                return Some(node);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unlink the binding for `key`, splicing its predecessor (or the head)
    /// onto its successor. Returns the detached node.
    pub(crate) fn unlink(&mut self, key: &str) -> Option<Box<Binding<'a, V>>> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key() != key) {
            cursor = &mut cursor.as_mut()?.next;
        }
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        Some(node)
    }

    pub(crate) fn iter(&self) -> Iter<'_, 'a, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<'a, V: ?Sized> Drop for Chain<'a, V> {
    fn drop(&mut self) {
        // Unlink one node at a time; the default recursive Box drop would
        // use stack proportional to chain length.
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

/// Iterator over one chain, head to tail.
pub struct Iter<'t, 'a, V: ?Sized> {
    next: Option<&'t Binding<'a, V>>,
}

impl<'t, 'a, V: ?Sized> Iterator for Iter<'t, 'a, V> {
    type Item = (&'t str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key(), node.value()))
    }
}

impl<'t, 'a, V: ?Sized> Clone for Iter<'t, 'a, V> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}
