use thiserror::Error;

/// Rejection raised by [`GridConfig::validate`](super::GridConfig::validate).
///
/// Generation never starts on a rejected config, so no non-finite value can
/// reach vertex positions or instance transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    /// A float field is NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Config field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A float field lies outside its accepted range.
    #[error("`{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Config field name.
        field: &'static str,
        /// Offending value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// Grid radius beyond what a single generation pass accepts.
    #[error("radius {radius} exceeds the maximum of {max}")]
    RadiusTooLarge {
        /// Requested radius.
        radius: u32,
        /// Largest accepted radius.
        max: u32,
    },
}
