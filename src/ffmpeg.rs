use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::containers::Container;
use crate::conversion_spec::ConversionSpec;
use crate::engine::Engine;

/// Client for one ffmpeg installation. Each job owns its own value; there is
/// no shared process-wide handle.
pub struct FFmpeg {
    program: String,
    overwrite: bool,
}

impl FFmpeg {
    pub fn new() -> Self {
        FFmpeg {
            program: String::from("ffmpeg"),
            overwrite: false,
        }
    }

    pub fn program(mut self, program: &str) -> Self {
        self.program = String::from(program);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn is_installed(&self) -> bool {
        let cmd = Command::new(&self.program)
            .arg("-codecs")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output();
        match cmd {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    fn build_args(&self, source: &Path, destination: &Path, spec: &ConversionSpec) -> Vec<String> {
        fn path_arg(p: &Path) -> String {
            p.to_string_lossy().into_owned()
        }

        let mut args = vec![
            String::from("-hide_banner"),
            String::from("-nostats"),
            String::from("-loglevel"), String::from("warning"),
            String::from("-progress"), String::from("pipe:1"),
            // -n refuses to clobber an existing destination; ffmpeg exits
            // non-zero and the failure is surfaced like any other.
            String::from(if self.overwrite { "-y" } else { "-n" }),
            String::from("-i"), path_arg(source),
        ];

        args.push(String::from("-c:a"));
        args.push(spec.audio().codec().encoder());
        args.push(String::from("-ar"));
        args.push(spec.audio().samplerate().to_string());
        args.push(String::from("-ac"));
        args.push(spec.audio().channels().to_string());

        args.push(String::from("-c:v"));
        args.push(spec.video().codec().encoder());
        args.push(String::from("-s"));
        args.push(format!("{}x{}", spec.video().width(), spec.video().height()));
        args.push(String::from("-r"));
        args.push(spec.video().fps().to_string());

        let mut container_args = Container::parameters(spec.container());
        args.append(&mut container_args);

        args.push(path_arg(destination));
        args
    }
}

impl Engine for FFmpeg {
    fn start(&self, source: &Path, destination: &Path, spec: &ConversionSpec) -> io::Result<Child> {
        Command::new(&self.program)
            .args(self.build_args(source, destination, spec))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec() -> ConversionSpec {
        ConversionSpec::new("mp4", "aac", 11025, 2, "hevc", 720, 400, 25).unwrap()
    }

    #[test]
    fn test_build_args() {
        let args = FFmpeg::new().build_args(
            &PathBuf::from("/videos/clip.mov"),
            &PathBuf::from("/videos/clip.mov.mp4"),
            &spec(),
        );
        assert_eq!(args, vec![
            "-hide_banner", "-nostats",
            "-loglevel", "warning",
            "-progress", "pipe:1",
            "-n",
            "-i", "/videos/clip.mov",
            "-c:a", "aac", "-ar", "11025", "-ac", "2",
            "-c:v", "libx265", "-s", "720x400", "-r", "25",
            "-movflags", "faststart", "-f", "mp4",
            "/videos/clip.mov.mp4",
        ]);
    }

    #[test]
    fn test_build_args_overwrite() {
        let args = FFmpeg::new().overwrite(true).build_args(
            &PathBuf::from("a.mov"),
            &PathBuf::from("a.mov.mp4"),
            &spec(),
        );
        assert!(args.contains(&String::from("-y")));
        assert!(!args.contains(&String::from("-n")));
    }
}
