//! Knobs for how forgiving [`Bank`](super::Bank) decoding is

/// What to do with WAVE files that have more than one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelPolicy {
    /// Keep the first channel of every frame, discard the rest
    #[default]
    FirstChannel,

    /// Reject anything that isn't mono
    MonoOnly,
}

/// What to do with decoded `-32768` samples, which are outside of
/// [`VALUE_RANGE`](crate::wavetable::VALUE_RANGE)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleBound {
    /// Load them as they are
    #[default]
    Trust,

    /// Raise them to `-32767`
    Clamp,

    /// Fail the load
    Reject,
}

/// Options for loading a [`Bank`](super::Bank)
///
/// The defaults accept everything the module itself would play back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub channels: ChannelPolicy,
    pub bound: SampleBound,
}

impl LoadOptions {
    /// Only accept files the way this crate writes them
    pub fn strict() -> Self {
        Self {
            channels: ChannelPolicy::MonoOnly,
            bound: SampleBound::Reject,
        }
    }
}
