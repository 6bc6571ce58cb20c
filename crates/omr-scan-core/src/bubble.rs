use nalgebra::Point2;
use serde::{Deserialize, Serialize, Serializer};

/// Raw circle reported by a circle detector, in image pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CircleCandidate {
    pub center: Point2<i32>,
    pub radius: i32,
}

impl CircleCandidate {
    pub fn new(x: i32, y: i32, radius: i32) -> Self {
        Self {
            center: Point2::new(x, y),
            radius,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.center.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.center.y
    }
}

/// Which answer column a candidate was assigned to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAssignment {
    Yes,
    No,
    Unassigned,
}

/// A candidate that landed in one of the answer columns, with its fill state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedBubble {
    #[serde(flatten)]
    pub candidate: CircleCandidate,
    pub column: ColumnAssignment,
    pub is_filled: bool,
    /// Mean brightness (0..255) of the sampled bubble interior.
    #[serde(serialize_with = "serialize_one_decimal")]
    pub center_intensity: f32,
}

impl ClassifiedBubble {
    #[inline]
    pub fn y(&self) -> i32 {
        self.candidate.center.y
    }
}

/// One question row: at most one bubble per answer column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowPair {
    pub yes: Option<ClassifiedBubble>,
    pub no: Option<ClassifiedBubble>,
}

impl RowPair {
    pub fn yes_filled(&self) -> bool {
        self.yes.is_some_and(|b| b.is_filled)
    }

    pub fn no_filled(&self) -> bool {
        self.no.is_some_and(|b| b.is_filled)
    }
}

fn serialize_one_decimal<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(((*value as f64) * 10.0).round() / 10.0)
}
