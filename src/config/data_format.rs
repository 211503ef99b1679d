use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

/// Where the channel dimension sits inside an image tensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// `(batch, channels, height, width)`
    ChannelsFirst,
    /// `(batch, height, width, channels)`
    #[default]
    ChannelsLast,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::ChannelsFirst => "channels_first",
            DataFormat::ChannelsLast => "channels_last",
        }
    }

    // Axis index of the channel dimension, counted with the batch axis included.
    // Channels-last uses the negative form so it stays valid for any rank.
    pub fn channel_axis(&self) -> i32 {
        match self {
            DataFormat::ChannelsFirst => 1,
            DataFormat::ChannelsLast => -1,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "channels_first" | "nchw" => Ok(DataFormat::ChannelsFirst),
            "channels_last" | "nhwc" => Ok(DataFormat::ChannelsLast),
            _ => Err(TopologyError::UnknownDataFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keras_spelling() {
        assert_eq!("channels_first".parse::<DataFormat>().unwrap(), DataFormat::ChannelsFirst);
        assert_eq!(" Channels_Last ".parse::<DataFormat>().unwrap(), DataFormat::ChannelsLast);
        assert_eq!("nchw".parse::<DataFormat>().unwrap(), DataFormat::ChannelsFirst);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "channels_middle".parse::<DataFormat>().unwrap_err();
        assert!(matches!(err, TopologyError::UnknownDataFormat(ref s) if s == "channels_middle"));
    }

    #[test]
    fn display_round_trips() {
        for format in [DataFormat::ChannelsFirst, DataFormat::ChannelsLast] {
            assert_eq!(format.to_string().parse::<DataFormat>().unwrap(), format);
        }
    }

    #[test]
    fn default_is_channels_last() {
        assert_eq!(DataFormat::default(), DataFormat::ChannelsLast);
        assert_eq!(DataFormat::ChannelsLast.channel_axis(), -1);
        assert_eq!(DataFormat::ChannelsFirst.channel_axis(), 1);
    }
}
