use std::path::PathBuf;

/// The two destination-naming strategies in circulation for this tool. One
/// appends ".mp4" to the full source file name, the other replaces the
/// existing extension. Both are kept; the caller chooses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Naming {
    AppendMp4,
    ReplaceExtension,
}

impl Naming {
    pub fn destination(&self, folder: &str, video: &str) -> PathBuf {
        let mut path = PathBuf::from(folder);
        match self {
            Naming::AppendMp4 => path.push(format!("{}.mp4", video)),
            Naming::ReplaceExtension => {
                let stem = match video.rsplit_once('.') {
                    Some((stem, _)) if !stem.is_empty() => stem,
                    _ => video,
                };
                path.push(format!("{}.mp4", stem));
            },
        }
        path
    }
}

pub fn source_path(folder: &str, video: &str) -> PathBuf {
    let mut path = PathBuf::from(folder);
    path.push(video);
    path
}
