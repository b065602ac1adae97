use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Voice presets accepted by the OpenAI speech endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
    Coral,
}

impl Voice {
    /// Every voice, in the order they are offered on the page
    pub const ALL: [Voice; 7] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
        Voice::Coral,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
            Voice::Coral => "coral",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Voice::Alloy => "Alloy - Neutral, balanced",
            Voice::Echo => "Echo - Clear, professional",
            Voice::Fable => "Fable - Warm, storytelling",
            Voice::Onyx => "Onyx - Deep, authoritative",
            Voice::Nova => "Nova - Bright, energetic",
            Voice::Shimmer => "Shimmer - Soft, gentle",
            Voice::Coral => "Coral - Cheerful, positive",
        }
    }
}

impl Default for Voice {
    fn default() -> Self {
        Voice::Coral
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown voice: {0}")]
pub struct UnknownVoice(pub String);

impl FromStr for Voice {
    type Err = UnknownVoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Voice::ALL
            .into_iter()
            .find(|voice| voice.id() == s)
            .ok_or_else(|| UnknownVoice(s.to_string()))
    }
}
