use std::{fmt, mem, slice};

/// A single named capture, consisting of a key and a value.
#[derive(PartialEq, Eq, Default, Clone)]
struct Binding {
    key: String,
    value: String,
}

// Most patterns have a small number of named captures, so we can avoid
// spilling to the heap in the common case.
const SMALL: usize = 3;

// Backing storage for the bindings, optimized for few captures.
#[derive(Clone)]
enum VarsKind {
    Small([Binding; SMALL], usize),
    Large(Vec<Binding>),
}

/// An ordered list of named captures produced by [`matches`](crate::matches).
///
/// Keys are unique: setting an existing key overwrites its value in place,
/// keeping the position the key was first inserted at. A single `Vars` can be
/// reused across repeated match attempts; a failed match leaves it empty.
///
/// ```rust
/// let mut vars = globmux::Vars::new();
/// assert!(globmux::matches("/users/{id}", "/users/1", &mut vars));
///
/// // Get a specific value by name.
/// assert_eq!(vars.get("id"), "1");
///
/// // Iterate through the keys and values.
/// for (key, value) in vars.iter() {
///     println!("key: {}, value: {}", key, value);
/// }
/// ```
#[derive(Clone)]
pub struct Vars {
    kind: VarsKind,
}

impl Vars {
    /// Returns an empty capture list.
    pub fn new() -> Self {
        Self {
            kind: VarsKind::Small(Default::default(), 0),
        }
    }

    /// Returns the number of captures.
    pub fn len(&self) -> usize {
        self.bindings().len()
    }

    /// Returns `true` if there are no captures in the list.
    pub fn is_empty(&self) -> bool {
        self.bindings().is_empty()
    }

    /// Returns the value bound under the given key, or the empty string if
    /// the key is unbound. Lookup never fails.
    pub fn get(&self, key: impl AsRef<str>) -> &str {
        let key = key.as_ref();
        self.bindings()
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| binding.value.as_str())
            .unwrap_or("")
    }

    /// Binds the given value under the given key.
    ///
    /// If the key is already bound its value is overwritten in place, so the
    /// iteration position of the key is the position of its first insertion.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(binding) = self
            .bindings_mut()
            .iter_mut()
            .find(|binding| binding.key == key)
        {
            binding.value.clear();
            binding.value.push_str(value);
            return;
        }

        self.push(Binding {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    /// Clears the list, keeping the backing storage for reuse.
    pub fn reset(&mut self) {
        match &mut self.kind {
            VarsKind::Small(_, len) => *len = 0,
            VarsKind::Large(vec) => vec.clear(),
        }
    }

    /// Returns an iterator over the captures, in first-insertion order.
    pub fn iter(&self) -> VarsIter<'_> {
        VarsIter {
            inner: self.bindings().iter(),
        }
    }

    fn bindings(&self) -> &[Binding] {
        match &self.kind {
            VarsKind::Small(arr, len) => &arr[..*len],
            VarsKind::Large(vec) => vec,
        }
    }

    fn bindings_mut(&mut self) -> &mut [Binding] {
        match &mut self.kind {
            VarsKind::Small(arr, len) => &mut arr[..*len],
            VarsKind::Large(vec) => vec,
        }
    }

    fn push(&mut self, binding: Binding) {
        #[cold]
        fn spill_to_vec(len: usize, binding: Binding, arr: &mut [Binding; SMALL]) -> Vec<Binding> {
            let mut vec = Vec::with_capacity(len + 1);
            vec.extend(arr.iter_mut().map(mem::take));
            vec.push(binding);
            vec
        }

        match &mut self.kind {
            VarsKind::Small(arr, len) => {
                if *len == SMALL {
                    self.kind = VarsKind::Large(spill_to_vec(*len, binding, arr));
                    return;
                }

                arr[*len] = binding;
                *len += 1;
            }
            VarsKind::Large(vec) => vec.push(binding),
        }
    }
}

impl Default for Vars {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Vars {
    fn eq(&self, other: &Self) -> bool {
        self.bindings() == other.bindings()
    }
}

impl Eq for Vars {}

impl fmt::Debug for Vars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the keys and values of a [`Vars`] list.
pub struct VarsIter<'v> {
    inner: slice::Iter<'v, Binding>,
}

impl<'v> Iterator for VarsIter<'v> {
    type Item = (&'v str, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|binding| (binding.key.as_str(), binding.value.as_str()))
    }
}

impl ExactSizeIterator for VarsIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
