//! Per-dimension enable flag and multiplier shared by every applier.

use serde::{Deserialize, Serialize};

/// One controlled dimension (an axis, or a single scalar property)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    /// Whether the dimension reacts at all
    pub enabled: bool,
    /// Scale applied to the normalized value
    pub multiplier: f32,
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            enabled: true,
            multiplier: 1.0,
        }
    }
}

impl Channel {
    /// Enabled channel with the given multiplier
    pub fn new(multiplier: f32) -> Self {
        Self {
            enabled: true,
            multiplier,
        }
    }

    /// Channel that never reacts
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            multiplier: 1.0,
        }
    }
}

/// Fixed-size set of channels, indexed by dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channels<const N: usize>(
    /// Channels in dimension order
    #[serde(with = "channel_array")]
    pub [Channel; N],
);

impl<const N: usize> Default for Channels<N> {
    fn default() -> Self {
        Self([Channel::default(); N])
    }
}

impl<const N: usize> Channels<N> {
    /// Every channel enabled with its own multiplier
    pub fn from_multipliers(multipliers: [f32; N]) -> Self {
        Self(multipliers.map(Channel::new))
    }

    /// Channel for a dimension
    pub fn get(&self, dimension: usize) -> Option<&Channel> {
        self.0.get(dimension)
    }

    /// Mutable channel for a dimension
    pub fn get_mut(&mut self, dimension: usize) -> Option<&mut Channel> {
        self.0.get_mut(dimension)
    }

    /// True if no dimension reacts
    pub fn all_disabled(&self) -> bool {
        self.0.iter().all(|c| !c.enabled)
    }

    /// Iterate channels in dimension order
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.0.iter()
    }
}

// serde only derives arrays up to 32 for concrete lengths, not const generics.
mod channel_array {
    use super::Channel;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        channels: &[Channel; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        channels.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[Channel; N], D::Error> {
        let channels = Vec::<Channel>::deserialize(deserializer)?;
        let len = channels.len();
        channels
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"one channel per dimension"))
    }
}
