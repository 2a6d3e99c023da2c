use std::io;
use std::path::Path;
use std::process::Child;

use crate::conversion_spec::ConversionSpec;

/// Seam between the job and the external transcoding engine. The production
/// implementation shells out to ffmpeg; tests substitute scripted processes.
///
/// Implementations must hand back a child whose stdout streams progress
/// lines; the job owns the child for the rest of its life.
pub trait Engine {
    fn start(&self, source: &Path, destination: &Path, spec: &ConversionSpec) -> io::Result<Child>;
}
