//! SymTableList: every binding in one chain. Each operation is a linear scan.

use crate::binding::{Binding, Chain};
use crate::table::{AllocError, PutError, SymTable};
use core::fmt;
use log::warn;

pub use crate::binding::Iter;

pub struct SymTableList<'a, V: ?Sized> {
    chain: Chain<'a, V>,
    len: usize,
}

impl<'a, V: ?Sized> SymTableList<'a, V> {
    pub const fn new() -> Self {
        Self {
            chain: Chain::new(),
            len: 0,
        }
    }

    /// Bindings from most to least recently inserted.
    pub fn iter(&self) -> Iter<'_, 'a, V> {
        self.chain.iter()
    }
}

impl<'a, V: ?Sized> Default for SymTableList<'a, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V: ?Sized + 'a> SymTable<'a, V> for SymTableList<'a, V> {
    fn try_new() -> Result<Self, AllocError> {
        // An empty list owns no heap memory.
        Ok(Self::new())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn put(&mut self, key: &str, value: &'a V) -> Result<(), PutError> {
        if self.chain.contains(key) {
            return Err(PutError::DuplicateKey);
        }
        let node = Binding::new(key, value).map_err(|err| {
            warn!("symtable: cannot copy key of {} bytes: {}", key.len(), err);
            PutError::OutOfMemory
        })?;
        self.chain.push_front(node);
        self.len += 1;
        Ok(())
    }

    fn replace(&mut self, key: &str, value: &'a V) -> Option<&'a V> {
        self.chain
            .find_mut(key)
            .map(|node| node.replace_value(value))
    }

    fn contains(&self, key: &str) -> bool {
        self.chain.contains(key)
    }

    fn get(&self, key: &str) -> Option<&'a V> {
        self.chain.find(key).map(Binding::value)
    }

    fn remove(&mut self, key: &str) -> Option<&'a V> {
        let node = self.chain.unlink(key)?;
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

impl<'t, 'a, V: ?Sized> IntoIterator for &'t SymTableList<'a, V> {
    type Item = (&'t str, &'a V);
    type IntoIter = Iter<'t, 'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V: ?Sized + fmt::Debug> fmt::Debug for SymTableList<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_is_empty() {
        let t: SymTableList<'_, i32> = SymTableList::new();
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert!(t.iter().next().is_none());
        assert!(SymTableList::<i32>::try_new().is_ok());
    }

    /// Duplicate put fails and leaves both the value and the length alone.
    #[test]
    fn duplicate_put_rejected() {
        let (one, two) = (1, 2);
        let mut t = SymTableList::new();
        assert_eq!(t.put("a", &one), Ok(()));
        assert_eq!(t.put("a", &two), Err(PutError::DuplicateKey));
        assert_eq!(t.get("a"), Some(&1));
        assert_eq!(t.len(), 1);
    }

    /// Iteration runs from the most recently inserted binding back.
    #[test]
    fn iteration_is_reverse_insertion_order() {
        let vals = [10, 20, 30];
        let mut t = SymTableList::new();
        for (k, v) in ["x", "y", "z"].iter().zip(&vals) {
            t.put(k, v).unwrap();
        }
        let seen: Vec<(&str, i32)> = t.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(seen, [("z", 30), ("y", 20), ("x", 10)]);
    }

    #[test]
    fn remove_from_each_position() {
        let vals = [0, 1, 2];
        let mut t = SymTableList::new();
        for (i, v) in vals.iter().enumerate() {
            t.put(&format!("k{}", i), v).unwrap();
        }
        assert_eq!(t.remove("k1"), Some(&1));
        assert_eq!(t.remove("k2"), Some(&2));
        assert_eq!(t.remove("k0"), Some(&0));
        assert_eq!(t.remove("k0"), None);
        assert!(t.is_empty());
    }

    /// The table holds references to caller values: `get` hands back the
    /// very same reference that was put.
    #[test]
    fn values_are_borrowed_not_copied() {
        let value = String::from("payload");
        let mut t: SymTableList<'_, String> = SymTableList::new();
        t.put("k", &value).unwrap();
        assert!(core::ptr::eq(t.get("k").unwrap(), &value));
    }

    #[test]
    fn debug_renders_as_map() {
        let one = 1;
        let mut t = SymTableList::new();
        t.put("a", &one).unwrap();
        assert_eq!(format!("{:?}", t), r#"{"a": 1}"#);
    }
}
