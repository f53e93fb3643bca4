use crate::foundation::error::SeqviewError;

/// How elapsed wall time maps to frame advance.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    /// Frame position tracks wall-clock time exactly; frames may be skipped to stay in sync.
    #[default]
    RealTime,
    /// Every tick shows the next frame, so no frame is skipped even when ticks run late.
    EveryFrame,
}

impl PlaybackMode {
    /// Stable diagnostic name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RealTime => "RealTime",
            Self::EveryFrame => "EveryFrame",
        }
    }
}

impl std::fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlaybackMode {
    type Err = SeqviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "realtime" => Ok(Self::RealTime),
            "everyframe" => Ok(Self::EveryFrame),
            _ => Err(SeqviewError::validation(format!(
                "unknown playback mode '{s}' (expected RealTime or EveryFrame)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/mode.rs"]
mod tests;
