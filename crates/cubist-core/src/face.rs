use glam::IVec2;

/// One of the four lateral neighbor directions in image space.
///
/// Image coordinates grow right and down, so `Top` looks toward the row
/// above (`y - 1`). The two cuboid faces along the depth axis have no
/// image-space neighbor and are always drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
}

/// All four lateral faces.
pub const LATERAL_FACES: [Face; 4] = [Face::Left, Face::Right, Face::Top, Face::Bottom];

impl Face {
    /// Grid offset toward the neighbor this face looks at.
    pub fn offset(self) -> IVec2 {
        match self {
            Face::Left => IVec2::new(-1, 0),
            Face::Right => IVec2::new(1, 0),
            Face::Top => IVec2::new(0, -1),
            Face::Bottom => IVec2::new(0, 1),
        }
    }
}

/// Packed set of lateral faces, one bit per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceSet(u8);

impl FaceSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// All four lateral faces.
    pub fn all() -> Self {
        Self(0b1111)
    }

    pub fn insert(&mut self, face: Face) {
        self.0 |= 1 << face as u8;
    }

    pub fn remove(&mut self, face: Face) {
        self.0 &= !(1 << face as u8);
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & (1 << face as u8) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
