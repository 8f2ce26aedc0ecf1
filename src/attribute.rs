// Copyright 2025 Lars Brubaker
// Per-element attribute arrays.
//
// An attribute is a named Vec<T> holding one value per element of the
// owning container, in the container's dense order. The container drives
// every attribute through the same push / swap-remove sequence it applies
// to its elements, so `attribute[container.index_of(h)]` always addresses
// the value of element `h`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MeshError, Result};

/// Type-erased attribute storage driven by the owning container.
trait AttributeStorage: Any {
    fn push_default(&mut self);
    fn swap_remove(&mut self, index: usize);
    fn clone_box(&self) -> Box<dyn AttributeStorage>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Per-element values of type `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute<T> {
    name: String,
    values: Vec<T>,
}

impl<T: Clone + Default + 'static> Attribute<T> {
    fn new(name: &str, len: usize) -> Self {
        Self {
            name: name.to_owned(),
            values: vec![T::default(); len],
        }
    }
}

impl<T> Attribute<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the element at dense index `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.values.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }
}

impl<T> Index<usize> for Attribute<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> IndexMut<usize> for Attribute<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

impl<T: Clone + Default + 'static> AttributeStorage for Attribute<T> {
    fn push_default(&mut self) {
        self.values.push(T::default());
    }

    fn swap_remove(&mut self, index: usize) {
        self.values.swap_remove(index);
    }

    fn clone_box(&self) -> Box<dyn AttributeStorage> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Named attributes of one element container.
pub struct AttributeMap {
    attributes: HashMap<String, Box<dyn AttributeStorage>>,
    element_count: usize,
}

impl AttributeMap {
    pub(crate) fn new() -> Self {
        Self {
            attributes: HashMap::new(),
            element_count: 0,
        }
    }

    /// Adds a default-initialized attribute with one value per element.
    ///
    /// Fails with [`MeshError::AttributeExists`] if `name` is taken.
    pub fn emplace<T: Clone + Default + 'static>(&mut self, name: &str) -> Result<&mut Attribute<T>> {
        if self.attributes.contains_key(name) {
            return Err(MeshError::AttributeExists {
                name: name.to_owned(),
            });
        }
        self.insert_new::<T>(name)
    }

    /// Returns the attribute named `name`, creating it if absent. The flag
    /// is `true` when the attribute was created by this call.
    pub fn try_emplace<T: Clone + Default + 'static>(
        &mut self,
        name: &str,
    ) -> Result<(&mut Attribute<T>, bool)> {
        if self.attributes.contains_key(name) {
            return self.get_mut::<T>(name).map(|attribute| (attribute, false));
        }
        self.insert_new::<T>(name).map(|attribute| (attribute, true))
    }

    fn insert_new<T: Clone + Default + 'static>(&mut self, name: &str) -> Result<&mut Attribute<T>> {
        let storage: Box<dyn AttributeStorage> = Box::new(Attribute::<T>::new(name, self.element_count));
        self.attributes
            .entry(name.to_owned())
            .or_insert(storage)
            .as_any_mut()
            .downcast_mut::<Attribute<T>>()
            .ok_or_else(|| MeshError::attribute_type_mismatch::<T>(name))
    }

    pub fn get<T: 'static>(&self, name: &str) -> Result<&Attribute<T>> {
        let storage = self
            .attributes
            .get(name)
            .ok_or_else(|| MeshError::AttributeNotFound {
                name: name.to_owned(),
            })?;
        storage
            .as_any()
            .downcast_ref::<Attribute<T>>()
            .ok_or_else(|| MeshError::attribute_type_mismatch::<T>(name))
    }

    pub fn get_mut<T: 'static>(&mut self, name: &str) -> Result<&mut Attribute<T>> {
        let storage = self
            .attributes
            .get_mut(name)
            .ok_or_else(|| MeshError::AttributeNotFound {
                name: name.to_owned(),
            })?;
        storage
            .as_any_mut()
            .downcast_mut::<Attribute<T>>()
            .ok_or_else(|| MeshError::attribute_type_mismatch::<T>(name))
    }

    /// Removes an attribute. Returns `false` if no attribute had that name.
    pub fn remove(&mut self, name: &str) -> bool {
        self.attributes.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.keys().map(String::as_str)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    // ─────────────── Container-driven updates ───────────────

    pub(crate) fn push_default(&mut self) {
        for storage in self.attributes.values_mut() {
            storage.push_default();
        }
        self.element_count += 1;
    }

    pub(crate) fn swap_remove(&mut self, index: usize) {
        for storage in self.attributes.values_mut() {
            storage.swap_remove(index);
        }
        self.element_count -= 1;
    }
}

impl Default for AttributeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AttributeMap {
    fn clone(&self) -> Self {
        Self {
            attributes: self
                .attributes
                .iter()
                .map(|(name, storage)| (name.clone(), storage.clone_box()))
                .collect(),
            element_count: self.element_count,
        }
    }
}

impl fmt::Debug for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("AttributeMap")
            .field("names", &names)
            .field("element_count", &self.element_count)
            .finish()
    }
}
