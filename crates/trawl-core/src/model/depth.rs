use core::fmt;
use serde::{Deserialize, Serialize};

/// Vertical band a shoal can swim in.
///
/// `Unknown` is a sentinel for "no information" and never takes part in
/// ordinal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Depth {
    Shallow = 0,
    Medium = 1,
    Deep = 2,
    Unknown = 3,
}

impl Depth {
    pub const ORDERED: [Depth; 3] = [Depth::Shallow, Depth::Medium, Depth::Deep];

    /// Ordinal used for relative-shift arithmetic (1..=3), `-1` for `Unknown`.
    pub const fn ordinal(self) -> i8 {
        match self {
            Depth::Shallow => 1,
            Depth::Medium => 2,
            Depth::Deep => 3,
            Depth::Unknown => -1,
        }
    }

    pub const fn from_ordinal(ordinal: i8) -> Option<Self> {
        match ordinal {
            1 => Some(Depth::Shallow),
            2 => Some(Depth::Medium),
            3 => Some(Depth::Deep),
            _ => None,
        }
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Depth::Unknown)
    }

    /// Depth one step away by ordinal, or `None` when the step leaves the
    /// ordered range or `self` is `Unknown`.
    pub const fn shifted(self, delta: i8) -> Option<Self> {
        if !self.is_known() {
            return None;
        }
        Self::from_ordinal(self.ordinal() + delta)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Depth::Shallow => "shallow",
            Depth::Medium => "medium",
            Depth::Deep => "deep",
            Depth::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Bit-set of depths. Holds at most four members, so set algebra is a
/// single mask operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DepthSet(u8);

impl DepthSet {
    pub const EMPTY: Self = Self(0);

    pub const fn single(depth: Depth) -> Self {
        Self(depth.bit())
    }

    pub const fn of(depths: &[Depth]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < depths.len() {
            mask |= depths[i].bit();
            i += 1;
        }
        Self(mask)
    }

    pub const fn contains(self, depth: Depth) -> bool {
        self.0 & depth.bit() != 0
    }

    pub const fn with(mut self, depth: Depth) -> Self {
        self.0 |= depth.bit();
        self
    }

    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The sole member when the set is a singleton.
    pub fn only(self) -> Option<Depth> {
        if self.len() == 1 { self.iter().next() } else { None }
    }

    pub fn iter(self) -> impl Iterator<Item = Depth> {
        [Depth::Shallow, Depth::Medium, Depth::Deep, Depth::Unknown]
            .into_iter()
            .filter(move |depth| self.contains(*depth))
    }

    pub fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }
}

impl fmt::Debug for DepthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for DepthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.iter().map(|d| d.to_string()).collect::<Vec<_>>();
        write!(f, "{{{}}}", labels.join(","))
    }
}

impl FromIterator<Depth> for DepthSet {
    fn from_iter<I: IntoIterator<Item = Depth>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, depth| set.with(depth))
    }
}

impl Serialize for DepthSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for DepthSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let depths = Vec::<Depth>::deserialize(deserializer)?;
        Ok(depths.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_never_shifts() {
        assert_eq!(Depth::Unknown.ordinal(), -1);
        assert_eq!(Depth::Unknown.shifted(1), None);
        assert_eq!(Depth::Unknown.shifted(-1), None);
    }

    #[test]
    fn shifts_stay_inside_ordered_range() {
        assert_eq!(Depth::Shallow.shifted(1), Some(Depth::Medium));
        assert_eq!(Depth::Deep.shifted(-1), Some(Depth::Medium));
        assert_eq!(Depth::Deep.shifted(1), None);
        assert_eq!(Depth::Shallow.shifted(-1), None);
    }

    #[test]
    fn set_algebra() {
        let a = DepthSet::of(&[Depth::Shallow, Depth::Medium]);
        let b = DepthSet::of(&[Depth::Medium, Depth::Deep]);
        assert_eq!(a.intersect(b), DepthSet::single(Depth::Medium));
        assert_eq!(a.intersect(b).only(), Some(Depth::Medium));
        assert_eq!(a.only(), None);
        assert!(DepthSet::single(Depth::Shallow).is_subset_of(a));
        assert!(!b.is_subset_of(a));
        assert_eq!(a.to_string(), "{shallow,medium}");
    }

    #[test]
    fn set_serializes_as_list() {
        let set = DepthSet::of(&[Depth::Deep, Depth::Shallow]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["shallow","deep"]"#);
        let back: DepthSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
