pub mod codecs;
pub mod containers;
pub mod conversion_spec;
pub mod destination;
pub mod engine;
pub mod error;
pub mod ffmpeg;
pub mod job;
pub mod probe;
pub mod timecode;

use std::fs;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use human_repr::HumanCount;
use rustop::opts;
use signal_hook::consts::{SIGINT, SIGTERM};

use conversion_spec::ConversionSpec;
use destination::Naming;
use ffmpeg::FFmpeg;
use job::{JobState, TranscodeJob};
use timecode::Timecode;

// exit code for a user-interrupted conversion, 128 + SIGINT
const EXIT_CANCELLED: u8 = 130;

fn main() -> ExitCode {
    let (args, _rest) = opts! {
        synopsis "Convert a video file into an MP4 container with re-encoded audio and video.";
        opt replace_extension:bool=false, desc:"Name the output by replacing the source extension instead of appending .mp4.";
        opt overwrite:bool=false, desc:"Overwrite the destination file if it already exists.";
        opt acodec:String=String::from("aac"), desc:"Audio codec. [aac, mp3, opus]";
        opt samplerate:u32=11025, desc:"Audio sample rate in Hz.";
        opt channels:u8=2, desc:"Audio channels. [1, 2]";
        opt vcodec:String=String::from("hevc"), desc:"Video codec. [hevc, h264, av1]";
        opt width:u32=720, desc:"Output width in pixels.";
        opt height:u32=400, desc:"Output height in pixels.";
        opt fps:u32=25, desc:"Output frame rate.";
        param video:String, desc:"Source video file name";
        param folder:String, desc:"Folder containing the source file";
    }.parse_or_exit();

    let spec = match ConversionSpec::new(
        "mp4",
        &args.acodec,
        args.samplerate,
        args.channels,
        &args.vcodec,
        args.width,
        args.height,
        args.fps,
    ) {
        Ok(spec) => spec,
        Err(err) => {
            println!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    let engine = FFmpeg::new().overwrite(args.overwrite);
    if !engine.is_installed() {
        println!("ffmpeg is not installed.");
        return ExitCode::FAILURE;
    }

    let naming = match args.replace_extension {
        true => Naming::ReplaceExtension,
        false => Naming::AppendMp4,
    };
    let source = destination::source_path(&args.folder, &args.video);
    let destination = naming.destination(&args.folder, &args.video);

    if let Ok(metadata) = probe::probe_file(&source) {
        let duration = metadata.duration
            .map(|d| format!("{}", Timecode::from_duration(d)))
            .unwrap_or_else(|| String::from("unknown duration"));
        let size = metadata.size
            .map(|s| format!("{}", s.human_count_bytes()))
            .unwrap_or_else(|| String::from("unknown size"));
        println!("{}: {}, {}", args.video, duration, size);
    }

    let mut job = match TranscodeJob::with_engine(source, destination, spec, Box::new(engine)) {
        Ok(job) => job,
        Err(err) => {
            println!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    let cancel = job.cancel_flag();
    let _ = signal_hook::flag::register(SIGINT, Arc::clone(&cancel));
    let _ = signal_hook::flag::register(SIGTERM, Arc::clone(&cancel));

    match job.progress() {
        Ok(events) => {
            for event in events {
                print!("\rConverting {}: {}", args.video, event.timecode);
                let _ = std::io::stdout().flush();
            }
            println!();
        },
        Err(err) => {
            println!("{}", err);
            return ExitCode::FAILURE;
        },
    }

    match job.state() {
        JobState::Completed => {
            match fs::metadata(job.destination()) {
                Ok(metadata) => println!("Wrote {:?} ({})", job.destination(), metadata.len().human_count_bytes()),
                Err(_) => println!("Wrote {:?}", job.destination()),
            }
            ExitCode::SUCCESS
        },
        JobState::Cancelled => {
            println!("Cancelled; partial output left at {:?}", job.destination());
            ExitCode::from(EXIT_CANCELLED)
        },
        _ => {
            match job.error() {
                Some(err) => {
                    println!("{}", err);
                    for line in err.tail() {
                        println!("  {}", line);
                    }
                },
                None => println!("Conversion failed."),
            }
            ExitCode::FAILURE
        },
    }
}
