//! Ordered-preference resolution and capability probing primitives shared
//! across the crate.

/// Outcome of probing an optional platform capability.
///
/// Consumed once at component initialization; call sites never re-probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Supported,
    Unsupported,
    /// The probe itself failed. Treated like `Unsupported` by consumers,
    /// but kept distinct so the failure can be logged.
    Unknown,
}

impl Support {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }
}

/// First candidate the predicate accepts, or `None` when the list is
/// exhausted.
pub fn first_supported<T, I, P>(candidates: I, is_supported: P) -> Option<T>
where
    I: IntoIterator<Item = T>,
    P: Fn(&T) -> bool,
{
    candidates.into_iter().find(|c| is_supported(c))
}

/// First candidate that is present and non-blank, trimmed.
pub fn first_filled<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.map(str::trim))
        .find(|c| !c.is_empty())
}
