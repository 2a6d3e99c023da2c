use std::fmt::Display;

#[derive(Clone, Debug, PartialEq)]
pub enum VideoCodec {
    Unknown(String),
    AV1,
    HEVC,
    H264,
}

impl VideoCodec {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "av1" => VideoCodec::AV1,
            "hevc" => VideoCodec::HEVC,
            "h264" => VideoCodec::H264,
            _ => VideoCodec::Unknown(String::from(s)),
        }
    }

    /// ffmpeg encoder name for the `-c:v` argument. Unknown codecs are passed
    /// through verbatim and left for the engine to accept or reject.
    pub fn encoder(&self) -> String {
        match self {
            VideoCodec::Unknown(codec) => codec.clone(),
            VideoCodec::AV1 => String::from("libsvtav1"),
            VideoCodec::HEVC => String::from("libx265"),
            VideoCodec::H264 => String::from("libx264"),
        }
    }
}

impl Display for VideoCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoCodec::Unknown(codec) => write!(f, "{}", codec.to_lowercase()),
            _ => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCodec {
    Unknown(String),
    AAC,
    MP3,
    Opus,
}

impl AudioCodec {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "aac" => AudioCodec::AAC,
            "mp3" => AudioCodec::MP3,
            "opus" => AudioCodec::Opus,
            _ => AudioCodec::Unknown(String::from(s)),
        }
    }

    /// ffmpeg encoder name for the `-c:a` argument.
    pub fn encoder(&self) -> String {
        match self {
            AudioCodec::Unknown(codec) => codec.clone(),
            AudioCodec::AAC => String::from("aac"),
            AudioCodec::MP3 => String::from("libmp3lame"),
            AudioCodec::Opus => String::from("libopus"),
        }
    }
}

impl Display for AudioCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioCodec::Unknown(codec) => write!(f, "{}", codec.to_lowercase()),
            AudioCodec::AAC => write!(f, "aac"),
            AudioCodec::MP3 => write!(f, "mp3"),
            AudioCodec::Opus => write!(f, "opus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_display() {
        assert_eq!(format!("{}", VideoCodec::AV1), "av1");
        assert_eq!(format!("{}", VideoCodec::HEVC), "hevc");
        assert_eq!(format!("{}", VideoCodec::H264), "h264");
    }

    #[test]
    fn test_video_encoder() {
        assert_eq!(VideoCodec::from_str("hevc").encoder(), "libx265");
        assert_eq!(VideoCodec::from_str("libvpx-vp9").encoder(), "libvpx-vp9");
    }

    #[test]
    fn test_audio_encoder() {
        assert_eq!(AudioCodec::from_str("aac").encoder(), "aac");
        assert_eq!(AudioCodec::from_str("MP3").encoder(), "libmp3lame");
        assert_eq!(AudioCodec::from_str("flac").encoder(), "flac");
    }
}
