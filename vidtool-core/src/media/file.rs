// ============================================================================
// vidtool-core/src/media/file.rs
// ============================================================================
//
// MEDIA FILE: A Probed Video File and the Operations on It
//
// `MediaFile::open` probes eagerly, so a handle always carries metadata. The
// three operations each build one ffmpeg command line and run it:
//
// - convert:       streamed; progress lines are pulled by the caller and a
//                  failing encoder surfaces once the lines are drained
// - repair:        blocking; always returns the output path, a non-zero exit
//                  is only logged
// - extract_audio: blocking; a non-zero exit yields `Ok(None)`
//
// Output files are written next to the input file.

use crate::config::Toolchain;
use crate::error::CoreResult;
use crate::external::{
    ChildProcess, CommandFfprobeExecutor, CommandLine, FfprobeExecutor, ProgressLines,
    run_streaming, run_to_completion,
};
use crate::formats::{Quality, ensure_audio_format, ensure_video_format};
use crate::media::metadata::MediaMetadata;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix and extension given to repaired files.
pub const REPAIRED_SUFFIX: &str = "_repaired.mp4";

/// A video file on disk together with its probed metadata.
#[derive(Debug, Clone)]
pub struct MediaFile {
    path: PathBuf,
    toolchain: Toolchain,
    metadata: MediaMetadata,
}

impl MediaFile {
    /// Probes `path` with the toolchain's ffprobe and returns a ready handle.
    ///
    /// # Errors
    ///
    /// * `DependencyNotFound` if ffprobe cannot be launched
    /// * `JsonParse` / `MalformedOutput` if its output is not usable metadata
    pub fn open(path: impl Into<PathBuf>, toolchain: &Toolchain) -> CoreResult<Self> {
        let executor = CommandFfprobeExecutor::from_toolchain(toolchain);
        Self::open_with(path, toolchain, &executor)
    }

    /// Same as [`MediaFile::open`] with a caller supplied prober.
    pub fn open_with<E: FfprobeExecutor>(
        path: impl Into<PathBuf>,
        toolchain: &Toolchain,
        executor: &E,
    ) -> CoreResult<Self> {
        let path = path.into();
        let metadata = probe_metadata(executor, &path)?;
        Ok(Self {
            path,
            toolchain: toolchain.clone(),
            metadata,
        })
    }

    /// Probes the file again and replaces the metadata wholesale.
    pub fn refresh_metadata(&mut self) -> CoreResult<()> {
        let executor = CommandFfprobeExecutor::from_toolchain(&self.toolchain);
        self.refresh_metadata_with(&executor)
    }

    pub fn refresh_metadata_with<E: FfprobeExecutor>(&mut self, executor: &E) -> CoreResult<()> {
        self.metadata = probe_metadata(executor, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &MediaMetadata {
        &self.metadata
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    // ---- Convert ----

    /// `ffmpeg -i <input> -crf <quality> <input stem>.<format>`
    pub fn convert_command(&self, output_format: &str, quality: Quality) -> CoreResult<CommandLine> {
        ensure_video_format(output_format)?;
        let ffmpeg = self.toolchain.require_ffmpeg()?;
        let output = convert_output_path(&self.path, output_format);

        let mut cmd = CommandLine::new(ffmpeg);
        cmd.arg("-i")
            .arg(&self.path)
            .arg("-crf")
            .arg(quality.crf())
            .arg(&output);
        Ok(cmd)
    }

    /// Starts the conversion and returns its progress lines.
    ///
    /// Nothing is spawned if the format is unsupported or ffmpeg is missing.
    /// A failing encoder is reported as the last item of the iterator.
    pub fn convert(
        &self,
        output_format: &str,
        quality: Quality,
    ) -> CoreResult<ProgressLines<ChildProcess>> {
        let cmd = self.convert_command(output_format, quality)?;
        log::info!(
            "Converting {} to {} (quality {})",
            self.path.display(),
            output_format,
            quality
        );
        run_streaming(&cmd)
    }

    // ---- Repair ----

    /// `ffmpeg -err_detect ignore_err -i <input> -c copy <input stem>_repaired.mp4`
    pub fn repair_command(&self) -> CommandLine {
        let mut cmd = CommandLine::new(self.toolchain.ffmpeg());
        cmd.args(["-err_detect", "ignore_err", "-i"])
            .arg(&self.path)
            .args(["-c", "copy"])
            .arg(repair_output_path(&self.path));
        cmd
    }

    /// Remuxes the file with error-tolerant demuxing and returns the output path.
    ///
    /// The path is returned even when ffmpeg exits non-zero; only a failure to
    /// launch ffmpeg is an error.
    pub fn repair(&self) -> CoreResult<PathBuf> {
        let cmd = self.repair_command();
        let output = run_to_completion(&cmd)?;
        if !output.status.success() {
            log::warn!(
                "Repair of {} exited with {}; output may be incomplete",
                self.path.display(),
                output.status
            );
        }
        Ok(repair_output_path(&self.path))
    }

    // ---- Extract audio ----

    /// `ffmpeg -i <input> -vn -acodec <format> <input stem>.<format>`
    pub fn extract_audio_command(&self, audio_format: &str) -> CoreResult<CommandLine> {
        ensure_audio_format(audio_format)?;
        let mut cmd = CommandLine::new(self.toolchain.ffmpeg());
        cmd.arg("-i")
            .arg(&self.path)
            .args(["-vn", "-acodec", audio_format])
            .arg(convert_output_path(&self.path, audio_format));
        Ok(cmd)
    }

    /// Extracts the audio into `<input stem>.<format>`.
    ///
    /// Returns `Ok(None)` if ffmpeg ran but exited non-zero.
    pub fn extract_audio(&self, audio_format: &str) -> CoreResult<Option<PathBuf>> {
        let cmd = self.extract_audio_command(audio_format)?;
        let output = run_to_completion(&cmd)?;
        if !output.status.success() {
            log::warn!(
                "Audio extraction from {} failed: {}",
                self.path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }
        Ok(Some(convert_output_path(&self.path, audio_format)))
    }
}

fn probe_metadata<E: FfprobeExecutor>(executor: &E, path: &Path) -> CoreResult<MediaMetadata> {
    let raw = executor.probe(path)?;
    let metadata = MediaMetadata::from_json(raw)?;
    log::debug!(
        "Probed {}: format={:?} duration={:?} resolution={:?} audio={:?}",
        path.display(),
        metadata.format,
        metadata.duration_secs,
        metadata.resolution,
        metadata.audio_tracks
    );
    Ok(metadata)
}

/// `input` with its extension replaced by `format` (or added, if it has none).
pub fn convert_output_path(input: &Path, format: &str) -> PathBuf {
    input.with_extension(format)
}

/// `input` with its extension replaced by `_repaired.mp4`.
pub fn repair_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(REPAIRED_SUFFIX);
    input.with_file_name(name)
}
