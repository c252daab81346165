// crates/fovstream-core/src/foveation.rs
//
// The foveation descriptor that rides with every frame into the encoder.

/// Side-data tag the descriptor is attached under (spec: `FOVEATION_DESCRIPTOR`).
pub const FOVEATION_DESCRIPTOR: &str = "FOVEATION_DESCRIPTOR";

/// `(fx, fy, sigma, offset)` — normalized gaze position, angular spread of
/// the high-quality region, and a quality bias. Wire payload is exactly 16
/// bytes (four little-endian f32s), matching the side-data size the
/// pipeline's testable properties check for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoveationDescriptor {
    pub fx:     f32,
    pub fy:     f32,
    pub sigma:  f32,
    pub offset: f32,
}

impl FoveationDescriptor {
    pub fn new(fx: f32, fy: f32, sigma: f32, offset: f32) -> Self {
        Self { fx, fy, sigma, offset }
    }

    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.fx.to_le_bytes());
        out[4..8].copy_from_slice(&self.fy.to_le_bytes());
        out[8..12].copy_from_slice(&self.sigma.to_le_bytes());
        out[12..16].copy_from_slice(&self.offset.to_le_bytes());
        out
    }

    /// Parse a 16-byte side-data payload back into a descriptor.
    ///
    /// Returns `None` if `bytes` isn't exactly 16 bytes — callers that read
    /// this back off a frame's side-data map should treat that as the
    /// resource-exhaustion/corruption case spec.md §7 groups under fatal
    /// codec-API violations, not a silent default.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 16 {
            return None;
        }
        let f = |s: &[u8]| f32::from_le_bytes(s.try_into().unwrap());
        Some(Self {
            fx:     f(&bytes[0..4]),
            fy:     f(&bytes[4..8]),
            sigma:  f(&bytes[8..12]),
            offset: f(&bytes[12..16]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let d = FoveationDescriptor::new(0.5, 0.25, 0.3, 20.0);
        let bytes = d.to_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(FoveationDescriptor::from_bytes(&bytes), Some(d));
    }

    #[test]
    fn rejects_wrong_length_payloads() {
        assert_eq!(FoveationDescriptor::from_bytes(&[0u8; 8]), None);
        assert_eq!(FoveationDescriptor::from_bytes(&[0u8; 17]), None);
    }
}
