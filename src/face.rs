use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Face representation for output meshes.
/// Points, lines, tris and quads are stack allocated,
/// general polygons are on the heap.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FaceKind<T = usize> {
    Point([T; 1]),
    Line([T; 2]),
    Tri([T; 3]),
    Quad([T; 4]),
    Poly(Vec<T>),
}

impl<T> FaceKind<T> {
    pub fn as_slice(&self) -> &[T] {
        use FaceKind::*;
        match self {
            Point(p) => p.as_slice(),
            Line(l) => l.as_slice(),
            Tri(t) => t.as_slice(),
            Quad(q) => q.as_slice(),
            Poly(v) => v.as_slice(),
        }
    }
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        use FaceKind::*;
        match self {
            Point(p) => p.as_mut_slice(),
            Line(l) => l.as_mut_slice(),
            Tri(t) => t.as_mut_slice(),
            Quad(q) => q.as_mut_slice(),
            Poly(v) => v.as_mut_slice(),
        }
    }
    /// Number of indices in this face.
    pub fn len(&self) -> usize {
        use FaceKind::*;
        match self {
            Point(_) => 1,
            Line(_) => 2,
            Tri(_) => 3,
            Quad(_) => 4,
            Poly(v) => v.len(),
        }
    }
    /// `true` if there are no indices in this face.
    pub fn is_empty(&self) -> bool {
        match self {
            FaceKind::Poly(v) => v.is_empty(),
            _ => false,
        }
    }

    /// Returns an empty face.
    pub fn empty() -> Self {
        FaceKind::Poly(vec![])
    }
}

impl FaceKind {
    /// A face with `n` index slots, all zero. Slots are filled in later by the vertex assembler.
    pub fn with_len(n: usize) -> Self {
        Self::from_iter(std::iter::repeat_n(0, n))
    }

    /// Picks the smallest variant which holds every item of `it`.
    pub fn from_iter(mut it: impl Iterator<Item = usize>) -> Self {
        let Some(e0) = it.next() else {
            return FaceKind::empty();
        };
        let Some(e1) = it.next() else {
            return FaceKind::Point([e0]);
        };
        let Some(e2) = it.next() else {
            return FaceKind::Line([e0, e1]);
        };
        let Some(e3) = it.next() else {
            return FaceKind::Tri([e0, e1, e2]);
        };
        let Some(e4) = it.next() else {
            return FaceKind::Quad([e0, e1, e2, e3]);
        };
        let mut poly = vec![e0, e1, e2, e3, e4];
        poly.extend(it);
        FaceKind::Poly(poly)
    }
}

/// How the vertex tuple of an input face is interpreted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Every vertex is its own point.
    Point,
    /// A polyline, each adjacent pair is one segment.
    Line,
    /// A single triangle or polygon.
    #[default]
    Polygon,
}

/// Set of primitive kinds used by the faces of a mesh.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveTypes(u8);

impl PrimitiveTypes {
    pub const EMPTY: Self = Self(0);
    pub const POINT: Self = Self(1 << 0);
    pub const LINE: Self = Self(1 << 1);
    pub const TRIANGLE: Self = Self(1 << 2);
    pub const POLYGON: Self = Self(1 << 3);

    pub const fn bits(self) -> u8 {
        self.0
    }
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PrimitiveTypes {
    type Output = Self;
    fn bitor(self, o: Self) -> Self {
        Self(self.0 | o.0)
    }
}

impl BitOrAssign for PrimitiveTypes {
    fn bitor_assign(&mut self, o: Self) {
        self.0 |= o.0;
    }
}

impl fmt::Debug for PrimitiveTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::POINT, "POINT"),
            (Self::LINE, "LINE"),
            (Self::TRIANGLE, "TRIANGLE"),
            (Self::POLYGON, "POLYGON"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in names {
            if !flag.is_empty() && self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

#[test]
fn test_from_iter_variants() {
    assert_eq!(FaceKind::from_iter([].into_iter()), FaceKind::empty());
    assert_eq!(FaceKind::from_iter([4].into_iter()), FaceKind::Point([4]));
    assert_eq!(FaceKind::from_iter([4, 5].into_iter()), FaceKind::Line([4, 5]));
    assert_eq!(FaceKind::from_iter(0..3), FaceKind::Tri([0, 1, 2]));
    assert_eq!(FaceKind::from_iter(0..4), FaceKind::Quad([0, 1, 2, 3]));
    assert_eq!(FaceKind::from_iter(0..6), FaceKind::Poly(vec![0, 1, 2, 3, 4, 5]));
}

#[test]
fn test_with_len() {
    for n in 0..8 {
        let f = FaceKind::with_len(n);
        assert_eq!(f.len(), n);
        assert_eq!(f.is_empty(), n == 0);
        assert!(f.as_slice().iter().all(|&i| i == 0));
    }
}

#[test]
fn test_primitive_types() {
    let mut p = PrimitiveTypes::EMPTY;
    assert!(p.is_empty());
    p |= PrimitiveTypes::LINE;
    p |= PrimitiveTypes::TRIANGLE;
    assert!(p.contains(PrimitiveTypes::LINE));
    assert!(!p.contains(PrimitiveTypes::POINT));
    assert_eq!(p, PrimitiveTypes::TRIANGLE | PrimitiveTypes::LINE);
    assert_eq!(p.bits(), 6);
    assert_eq!(PrimitiveTypes::EMPTY.bits(), 0);
    assert_eq!(format!("{p:?}"), "{LINE, TRIANGLE}");
}
