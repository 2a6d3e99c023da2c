use crate::codecs::{AudioCodec, VideoCodec};
use crate::containers::Container;
use crate::error::ValidationError;

const MAX_SAMPLERATE: u32 = 192_000;
const MAX_DIMENSION: u32 = 8192;
const MAX_FPS: u32 = 240;

#[derive(Clone, Debug, PartialEq)]
pub struct AudioSettings {
    codec: AudioCodec,
    samplerate: u32,
    channels: u8,
}

impl AudioSettings {
    pub fn codec(&self) -> &AudioCodec {
        &self.codec
    }

    pub fn samplerate(&self) -> u32 {
        self.samplerate
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoSettings {
    codec: VideoCodec,
    width: u32,
    height: u32,
    fps: u32,
}

impl VideoSettings {
    pub fn codec(&self) -> &VideoCodec {
        &self.codec
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Validated description of the desired output. Construction is the only
/// place values are checked; nothing mutates a spec afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionSpec {
    container: Container,
    audio: AudioSettings,
    video: VideoSettings,
}

impl ConversionSpec {
    pub fn new(
        container_format: &str,
        audio_codec: &str,
        samplerate: u32,
        channels: u8,
        video_codec: &str,
        width: u32,
        height: u32,
        fps: u32,
    ) -> Result<ConversionSpec, ValidationError> {
        let container = match Container::from_str(container_format) {
            Some(c) => c,
            None => {
                return Err(ValidationError::for_field(
                    "container_format",
                    &format!("'{}' is not a supported container format", container_format),
                ));
            },
        };
        if audio_codec.is_empty() {
            return Err(ValidationError::for_field("audio_codec", "must not be empty"));
        }
        if samplerate == 0 || samplerate > MAX_SAMPLERATE {
            return Err(ValidationError::for_field(
                "samplerate",
                &format!("{} is not between 1 and {}", samplerate, MAX_SAMPLERATE),
            ));
        }
        if channels != 1 && channels != 2 {
            return Err(ValidationError::for_field(
                "channels",
                &format!("{} is not 1 (mono) or 2 (stereo)", channels),
            ));
        }
        if video_codec.is_empty() {
            return Err(ValidationError::for_field("video_codec", "must not be empty"));
        }
        if width == 0 || width > MAX_DIMENSION {
            return Err(ValidationError::for_field(
                "width",
                &format!("{} is not between 1 and {}", width, MAX_DIMENSION),
            ));
        }
        if height == 0 || height > MAX_DIMENSION {
            return Err(ValidationError::for_field(
                "height",
                &format!("{} is not between 1 and {}", height, MAX_DIMENSION),
            ));
        }
        if fps == 0 || fps > MAX_FPS {
            return Err(ValidationError::for_field(
                "fps",
                &format!("{} is not between 1 and {}", fps, MAX_FPS),
            ));
        }
        Ok(ConversionSpec {
            container,
            audio: AudioSettings {
                codec: AudioCodec::from_str(audio_codec),
                samplerate,
                channels,
            },
            video: VideoSettings {
                codec: VideoCodec::from_str(video_codec),
                width,
                height,
                fps,
            },
        })
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn audio(&self) -> &AudioSettings {
        &self.audio
    }

    pub fn video(&self) -> &VideoSettings {
        &self.video
    }
}
