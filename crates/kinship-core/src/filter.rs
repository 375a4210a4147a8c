//! Edge-selection predicates shared by every traversal.

/// Which relationship labels a traversal may follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeFilter<'a> {
    /// Every edge, regardless of label.
    #[default]
    All,
    /// Only edges carrying exactly this label.
    Label(&'a str),
    /// Edges carrying any of these labels. An empty slice admits nothing.
    AnyOf(&'a [&'a str]),
}

impl EdgeFilter<'_> {
    pub fn admits(&self, label: &str) -> bool {
        match self {
            Self::All => true,
            Self::Label(wanted) => *wanted == label,
            Self::AnyOf(wanted) => wanted.contains(&label),
        }
    }
}

impl<'a> From<Option<&'a str>> for EdgeFilter<'a> {
    fn from(label: Option<&'a str>) -> Self {
        label.map_or(Self::All, Self::Label)
    }
}
