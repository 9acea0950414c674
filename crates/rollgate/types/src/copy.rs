//! Deep copy discipline for records crossing a storage boundary.
//!
//! Only types built entirely from owned data implement [`DeepCopy`]. A type
//! holding `Rc`, `Arc` or interior mutability must not implement it, since a
//! `clone` of such a type would alias state with its source.

/// A record whose copies share no mutable sub-structure with the original.
pub trait DeepCopy: Clone {
    /// Produce a structurally equal, fully independent copy.
    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Copy function for use in iterator pipelines, e.g. `.map(deep_copier())`.
pub fn deep_copier<T: DeepCopy>() -> fn(&T) -> T {
    T::deep_copy
}
