//! Track segment chain.
//!
//! Segments live in a flat arena and link to each other by [`SegmentId`].
//! A closed circuit links the last segment back to the first; an open chain
//! ends with `next == None`, which the braking look-ahead treats as
//! "no further constraint".

use std::f32::consts::{PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TrackError, TrackResult};

/// Index of a segment inside its [`Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Segment shape. Curves are named by the direction they turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    #[default]
    Straight,
    Left,
    Right,
}

impl SegmentKind {
    /// Whether this segment bends.
    pub fn is_curve(self) -> bool {
        !matches!(self, SegmentKind::Straight)
    }

    /// Sign of the lateral offset that points toward the inside of the curve.
    ///
    /// Lateral offset is positive to the left of the centerline, so a left
    /// curve has its inside at positive offsets. Straights have no inside.
    pub fn inside_sign(self) -> f32 {
        match self {
            SegmentKind::Straight => 0.0,
            SegmentKind::Left => 1.0,
            SegmentKind::Right => -1.0,
        }
    }
}

/// One piece of track geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: SegmentId,
    pub kind: SegmentKind,
    /// Centerline length in meters (arc * radius for curves)
    pub length: f32,
    /// Swept angle in radians, zero for straights
    pub arc: f32,
    /// Centerline radius in meters, zero for straights
    pub radius: f32,
    /// Surface friction coefficient
    pub friction: f32,
    /// Drivable width in meters
    pub width: f32,
    /// Track heading at the segment start, radians
    pub start_heading: f32,
    pub next: Option<SegmentId>,
}

impl TrackSegment {
    pub fn is_straight(&self) -> bool {
        !self.kind.is_curve()
    }

    /// Distance left to the end of this segment.
    ///
    /// `to_start` is meters along a straight, radians along a curve.
    pub fn distance_to_end(&self, to_start: f32) -> f32 {
        let remaining = if self.is_straight() {
            self.length - to_start
        } else {
            (self.arc - to_start) * self.radius
        };
        remaining.max(0.0)
    }

    /// Track tangent heading at `to_start` into the segment.
    pub fn tangent_heading(&self, to_start: f32) -> f32 {
        let heading = match self.kind {
            SegmentKind::Straight => self.start_heading,
            SegmentKind::Left => self.start_heading + to_start,
            SegmentKind::Right => self.start_heading - to_start,
        };
        normalize_pi(heading)
    }

    /// Heading at the segment end.
    pub fn end_heading(&self) -> f32 {
        self.tangent_heading(self.arc)
    }

    fn validate(&self) -> TrackResult<()> {
        let bad = |reason| TrackError::InvalidGeometry {
            segment: self.id,
            reason,
        };

        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(bad("width must be > 0"));
        }
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(bad("friction must be >= 0"));
        }
        if self.is_straight() {
            if !(self.length.is_finite() && self.length > 0.0) {
                return Err(bad("straight length must be > 0"));
            }
        } else {
            if !(self.radius.is_finite() && self.radius > 0.0) {
                return Err(bad("curve radius must be > 0"));
            }
            if !(self.arc.is_finite() && self.arc > 0.0) {
                return Err(bad("curve arc must be > 0"));
            }
        }
        Ok(())
    }
}

/// Unlinked segment description, as read from a track file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    #[serde(default)]
    pub kind: SegmentKind,
    /// Straight length in meters (ignored for curves)
    #[serde(default)]
    pub length: f32,
    /// Curve radius in meters (ignored for straights)
    #[serde(default)]
    pub radius: f32,
    /// Curve arc in radians (ignored for straights)
    #[serde(default)]
    pub arc: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    #[serde(default = "default_width")]
    pub width: f32,
}

fn default_friction() -> f32 {
    1.0
}

fn default_width() -> f32 {
    10.0
}

impl SegmentSpec {
    pub fn straight(length: f32) -> Self {
        Self {
            kind: SegmentKind::Straight,
            length,
            radius: 0.0,
            arc: 0.0,
            friction: default_friction(),
            width: default_width(),
        }
    }

    pub fn left(radius: f32, arc: f32) -> Self {
        Self::curve(SegmentKind::Left, radius, arc)
    }

    pub fn right(radius: f32, arc: f32) -> Self {
        Self::curve(SegmentKind::Right, radius, arc)
    }

    fn curve(kind: SegmentKind, radius: f32, arc: f32) -> Self {
        Self {
            kind,
            length: 0.0,
            radius,
            arc,
            friction: default_friction(),
            width: default_width(),
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// Validated, linked track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    segments: Vec<TrackSegment>,
}

impl Track {
    /// Link segment specs in order, accumulating start headings.
    ///
    /// With `closed` the last segment links back to the first.
    pub fn from_specs(specs: &[SegmentSpec], closed: bool) -> TrackResult<Self> {
        let count = specs.len();
        let mut heading = 0.0f32;
        let mut segments = Vec::with_capacity(count);

        for (index, spec) in specs.iter().enumerate() {
            let next = match index.checked_add(1) {
                Some(n) if n < count => Some(SegmentId(n)),
                _ if closed => Some(SegmentId(0)),
                _ => None,
            };
            let (length, arc, radius) = if spec.kind.is_curve() {
                (spec.arc * spec.radius, spec.arc, spec.radius)
            } else {
                (spec.length, 0.0, 0.0)
            };
            let segment = TrackSegment {
                id: SegmentId(index),
                kind: spec.kind,
                length,
                arc,
                radius,
                friction: spec.friction,
                width: spec.width,
                start_heading: heading,
                next,
            };
            heading = segment.end_heading();
            segments.push(segment);
        }

        Self::from_segments(segments)
    }

    /// Wrap pre-linked segments after checking ids, links and geometry.
    pub fn from_segments(segments: Vec<TrackSegment>) -> TrackResult<Self> {
        if segments.is_empty() {
            return Err(TrackError::Empty);
        }

        for (index, segment) in segments.iter().enumerate() {
            if segment.id.0 != index {
                return Err(TrackError::InvalidGeometry {
                    segment: segment.id,
                    reason: "segment id does not match its position",
                });
            }
            segment.validate()?;
            if let Some(next) = segment.next
                && next.0 >= segments.len()
            {
                return Err(TrackError::DanglingLink {
                    segment: segment.id,
                    next,
                });
            }
        }

        Ok(Self { segments })
    }

    pub fn segment(&self, id: SegmentId) -> Option<&TrackSegment> {
        self.segments.get(id.0)
    }

    /// Segment following `segment`, or `None` at the end of an open chain.
    pub fn next(&self, segment: &TrackSegment) -> Option<&TrackSegment> {
        segment.next.and_then(|id| self.segment(id))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackSegment> {
        self.segments.iter()
    }

    /// Sum of all centerline lengths.
    pub fn total_length(&self) -> f32 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Whether the last segment links back into the chain.
    pub fn is_closed(&self) -> bool {
        self.segments.last().is_some_and(|s| s.next.is_some())
    }
}

/// Normalize an angle to (-PI, PI]. Non-finite input maps to zero.
pub fn normalize_pi(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}
