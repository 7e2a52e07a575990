/// Canonical form of the match-everything filter.
pub const WILDCARD: &str = ".*";

#[derive(Clone, Debug, PartialEq, Eq)]
struct Filter {
    label: String,
    extension: String,
}

impl Filter {
    fn literal(raw: &str) -> Self {
        let label = raw.trim().to_string();
        let extension = canonicalize(&label);
        Self { label, extension }
    }

    fn is_wildcard(&self) -> bool {
        self.extension == WILDCARD
    }
}

/// Canonical extension form of a filter expression.
///
/// `"*.PNG"` and `"png"` both become `".png"`; `"*"`, `"*.*"` and `".*"`
/// become [`WILDCARD`].
pub fn canonicalize(raw: &str) -> String {
    let s = raw.trim().to_lowercase();
    let s = s.strip_prefix('*').unwrap_or(&s);
    if s.is_empty() || s == "." || s == ".*" {
        return WILDCARD.to_string();
    }
    if s.starts_with('.') {
        s.to_string()
    } else {
        format!(".{s}")
    }
}

/// Ordered extension filters plus the currently selected one.
///
/// With several literal filters and no wildcard among them, index 0 holds a
/// synthesized combined filter matching any of the literals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterList {
    filters: Vec<Filter>,
    combined: bool,
    selected: usize,
}

impl FilterList {
    /// Build a list from raw filter expressions (see [`set`](Self::set)).
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        list.set(filters);
        list
    }

    /// Replace all filters and select index 0.
    pub fn set<I, S>(&mut self, filters: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let literals = filters
            .into_iter()
            .map(|f| Filter::literal(f.as_ref()))
            .collect::<Vec<_>>();

        self.filters.clear();
        self.combined = literals.len() > 1 && !literals.iter().any(Filter::is_wildcard);
        if self.combined {
            let label = literals
                .iter()
                .map(|f| f.label.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let extension = literals
                .iter()
                .map(|f| f.extension.as_str())
                .collect::<Vec<_>>()
                .join(",");
            self.filters.push(Filter { label, extension });
        }
        self.filters.extend(literals);
        self.selected = 0;
    }

    /// Remove every filter; everything matches afterwards.
    pub fn clear(&mut self) {
        self.filters.clear();
        self.combined = false;
        self.selected = 0;
    }

    /// Number of entries, combined filter included.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Display labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.label.as_str()).collect()
    }

    /// Whether index 0 is a synthesized combined filter.
    pub fn has_combined(&self) -> bool {
        self.combined
    }

    /// Currently selected index (0 when empty).
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select `index`. Out-of-range indices are ignored and return `false`.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.filters.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Whether a file with `extension` (e.g. `".png"`, or `""`) passes.
    pub fn matches(&self, extension: &str) -> bool {
        let Some(current) = self.filters.get(self.selected) else {
            return true;
        };
        let ext = extension.to_lowercase();
        if self.selected == 0 && self.combined {
            return self.filters[1..].iter().any(|f| f.extension == ext);
        }
        current.is_wildcard() || current.extension == ext
    }
}
