use indexmap::IndexMap;
use smartstring::alias::String;

/// Ordered table of grammar symbols, each with the numbers of the
/// productions whose right-hand side uses it.
///
/// A production that mentions a symbol twice is recorded twice.
#[derive(Default, Debug, Clone)]
pub struct Symtab {
    map: IndexMap<String, Vec<usize>>,
}

impl Symtab {
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    /// Adds `sym` with no uses, keeping existing uses if it is already present.
    pub fn add(&mut self, sym: &str) -> usize {
        let entry = self.map.entry(sym.into());
        let idx = entry.index();
        entry.or_default();
        idx
    }

    /// Records that production `prod` uses `sym`, adding `sym` if needed.
    pub fn record(&mut self, sym: &str, prod: usize) {
        self.map.entry(sym.into()).or_default().push(prod);
    }

    pub fn contains(&self, sym: &str) -> bool {
        self.map.contains_key(sym)
    }

    /// Production numbers using `sym`, in the order they were recorded.
    pub fn uses(&self, sym: &str) -> Option<&[usize]> {
        self.map.get(sym).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Symtab {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut st = Symtab::new();
        for sym in iter {
            st.add(sym.as_ref());
        }
        st
    }
}
