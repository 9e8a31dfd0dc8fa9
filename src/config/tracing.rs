//! Primary tracer and shadow tracer selections.

use serde::{Deserialize, Serialize};

/// Primary ray traversal algorithm.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tracer {
    #[default]
    SdfTrace,
    BdfTrace,
    /// Segment tracing; only valid on the blob scene.
    SegmentTrace,
    /// Reference sphere tracer from the segment tracing paper; blob scene only.
    TheirSphereTrace,
}

impl Tracer {
    pub const ALL: [Tracer; 4] = [
        Tracer::SdfTrace,
        Tracer::BdfTrace,
        Tracer::SegmentTrace,
        Tracer::TheirSphereTrace,
    ];

    /// Tracers every scene accepts.
    pub const DISTANCE_FIELD: [Tracer; 2] = [Tracer::SdfTrace, Tracer::BdfTrace];

    pub fn label(&self) -> &'static str {
        match self {
            Tracer::SdfTrace => "sdf_trace",
            Tracer::BdfTrace => "bdf_trace",
            Tracer::SegmentTrace => "segment_trace",
            Tracer::TheirSphereTrace => "their_sphere_trace",
        }
    }

    /// Whether this tracer belongs to the plain SDF/BDF family.
    pub fn is_distance_field(&self) -> bool {
        matches!(self, Tracer::SdfTrace | Tracer::BdfTrace)
    }

    /// Closest SDF/BDF tracer: sphere tracing maps to SDF, segment tracing to BDF.
    pub fn to_distance_field(self) -> Tracer {
        match self {
            Tracer::TheirSphereTrace => Tracer::SdfTrace,
            Tracer::SegmentTrace => Tracer::BdfTrace,
            other => other,
        }
    }

    /// Whether the march epsilon slider applies.
    pub fn uses_march_epsilon(&self) -> bool {
        matches!(self, Tracer::SegmentTrace | Tracer::TheirSphereTrace)
    }

    /// Whether the kappa factor slider applies.
    pub fn uses_kappa_factor(&self) -> bool {
        matches!(self, Tracer::SegmentTrace)
    }
}

/// Shadow ray traversal, or none.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Shadow {
    #[default]
    SdfTrace,
    BdfTrace,
    NoShadow,
}

impl Shadow {
    pub const ALL: [Shadow; 3] = [Shadow::SdfTrace, Shadow::BdfTrace, Shadow::NoShadow];

    pub fn label(&self) -> &'static str {
        match self {
            Shadow::SdfTrace => "sdf_trace",
            Shadow::BdfTrace => "bdf_trace",
            Shadow::NoShadow => "no_shadow",
        }
    }

    /// Shadow tracer in the same family as the primary tracer.
    pub fn mirroring(tracer: Tracer) -> Shadow {
        if tracer == Tracer::SdfTrace {
            Shadow::SdfTrace
        } else {
            Shadow::BdfTrace
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Shadow::NoShadow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_field_remap() {
        assert_eq!(Tracer::TheirSphereTrace.to_distance_field(), Tracer::SdfTrace);
        assert_eq!(Tracer::SegmentTrace.to_distance_field(), Tracer::BdfTrace);
        assert_eq!(Tracer::SdfTrace.to_distance_field(), Tracer::SdfTrace);
        assert_eq!(Tracer::BdfTrace.to_distance_field(), Tracer::BdfTrace);
    }

    #[test]
    fn test_shadow_never_mirrors_to_segment_family() {
        for tracer in Tracer::ALL {
            let shadow = Shadow::mirroring(tracer);
            assert!(shadow.is_enabled());
            assert_eq!(shadow == Shadow::SdfTrace, tracer == Tracer::SdfTrace);
        }
    }
}
