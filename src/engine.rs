//! Removal orchestration and file processing.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbaImage;

use crate::complexity::analyze_complexity;
use crate::crop::crop_watermark;
use crate::error::{Error, Result};
use crate::region::{detect_region, WatermarkRegion};
use crate::stamp::clone_stamp;

/// Maximum accepted input file size: 50 MiB.
pub const MAX_FILE_SIZE: u64 = 52_428_800;

/// Watermark removal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMethod {
    /// Clone stamp (gradient interpolation): replaces badge pixels with the
    /// interpolated background, preserving image dimensions.
    SmartFill,
    /// Crop: truncates the bottom strip containing the badge. 100% reliable,
    /// reduces image height.
    Crop,
}

impl RemovalMethod {
    /// The method's canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SmartFill => "smartfill",
            Self::Crop => "crop",
        }
    }
}

impl std::fmt::Display for RemovalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemovalMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "smartfill" => Ok(Self::SmartFill),
            "crop" => Ok(Self::Crop),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}

/// Outcome of one watermark removal, wrapping the produced surface.
#[derive(Debug)]
pub struct RemovalResult {
    /// The produced surface: the working surface for smartfill, a new
    /// shorter surface for crop.
    pub image: RgbaImage,
    /// The method that was applied.
    pub method: RemovalMethod,
    /// The region that was removed or filled.
    pub region: WatermarkRegion,
    /// Width of the input surface.
    pub original_width: u32,
    /// Height of the input surface.
    pub original_height: u32,
}

/// Remove the watermark from a decoded surface.
///
/// The input is copied onto a working surface; the region is `custom_region`
/// when supplied, else detected from the dimensions. Crop returns a new
/// shorter surface, smartfill mutates the working surface in place and
/// returns it with dimensions unchanged.
#[must_use]
pub fn remove_watermark(
    source: &RgbaImage,
    method: RemovalMethod,
    custom_region: Option<WatermarkRegion>,
) -> RemovalResult {
    let (width, height) = source.dimensions();
    let region = custom_region.unwrap_or_else(|| detect_region(width, height));

    let image = match method {
        RemovalMethod::Crop => crop_watermark(source, &region),
        RemovalMethod::SmartFill => {
            let mut working = source.clone();
            clone_stamp(&mut working, &region);
            working
        }
    };

    RemovalResult {
        image,
        method,
        region,
        original_width: width,
        original_height: height,
    }
}

/// Options controlling file processing behavior.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Removal strategy to apply.
    pub method: RemovalMethod,
    /// Override the detected region instead of computing it per image.
    pub custom_region: Option<WatermarkRegion>,
    /// JPEG output quality (1-100).
    pub jpeg_quality: u8,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            method: RemovalMethod::SmartFill,
            custom_region: None,
            jpeg_quality: 95,
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Background complexity score above the watermark region, `[0, 1]`.
    /// Diagnostic only; high values mean smartfill worked over busy texture.
    pub complexity: f32,
    /// Human-readable status message.
    pub message: String,
}

/// Process a single image file: load, remove the watermark, save.
///
/// Enforces the 50 MiB input cap before decoding. Failures are reported in
/// the returned [`ProcessResult`] rather than as errors, so batch callers
/// can continue with the remaining files.
#[must_use]
pub fn process_file(input: &Path, output: &Path, opts: &ProcessOptions) -> ProcessResult {
    let mut result = ProcessResult {
        path: input.to_path_buf(),
        success: false,
        complexity: 0.0,
        message: String::new(),
    };

    if !is_supported_file(input) {
        result.message = format!("Unsupported format: {}", input.display());
        return result;
    }

    match std::fs::metadata(input) {
        Ok(meta) if meta.len() > MAX_FILE_SIZE => {
            result.message = Error::FileTooLarge {
                size: meta.len(),
                limit: MAX_FILE_SIZE,
            }
            .to_string();
            return result;
        }
        Ok(_) => {}
        Err(e) => {
            result.message = format!("Failed to read: {e}");
            return result;
        }
    }

    let source = match image::open(input) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            result.message = format!("Failed to decode: {e}");
            return result;
        }
    };

    let region = opts
        .custom_region
        .unwrap_or_else(|| detect_region(source.width(), source.height()));
    result.complexity = analyze_complexity(&source, &region);

    let removal = remove_watermark(&source, opts.method, Some(region));

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                result.message = format!("Failed to create output directory: {e}");
                return result;
            }
        }
    }

    match save_image(&removal.image, output, opts.jpeg_quality) {
        Ok(()) => {
            result.success = true;
            result.message = match removal.method {
                RemovalMethod::SmartFill => "Watermark removed (smartfill)".to_string(),
                RemovalMethod::Crop => format!(
                    "Watermark cropped ({}x{} -> {}x{})",
                    removal.original_width,
                    removal.original_height,
                    removal.image.width(),
                    removal.image.height()
                ),
            };
        }
        Err(e) => {
            result.message = format!("Failed to save: {e}");
        }
    }

    result
}

/// Process all supported images in a directory.
///
/// Uses parallel iteration when the `cli` feature is enabled (via rayon) —
/// safe because each removal owns its own surface. Returns a
/// [`ProcessResult`] per image found.
///
/// # Panics
///
/// Panics if any directory entry has no filename (should not happen for
/// regular files).
#[must_use]
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    opts: &ProcessOptions,
) -> Vec<ProcessResult> {
    let entries: Vec<_> = match std::fs::read_dir(input_dir) {
        Ok(rd) => rd
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(|e| is_supported_file(e.path().as_path()))
            .collect(),
        Err(e) => {
            return vec![ProcessResult {
                path: input_dir.to_path_buf(),
                success: false,
                complexity: 0.0,
                message: format!("Failed to read directory: {e}"),
            }];
        }
    };

    if !output_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            return vec![ProcessResult {
                path: output_dir.to_path_buf(),
                success: false,
                complexity: 0.0,
                message: format!("Failed to create output directory: {e}"),
            }];
        }
    }

    let process_entry = |entry: &std::fs::DirEntry| {
        let input_path = entry.path();
        let out_name = default_output_path(&input_path);
        let output_path = output_dir.join(out_name.file_name().unwrap());
        process_file(&input_path, &output_path, opts)
    };

    #[cfg(feature = "cli")]
    {
        use rayon::prelude::*;
        entries.par_iter().map(process_entry).collect()
    }

    #[cfg(not(feature = "cli"))]
    {
        entries.iter().map(process_entry).collect()
    }
}

/// Check if a file has a supported image extension (`.png`, `.jpg`, `.jpeg`).
///
/// PDFs are handled by an external rasterization layer, not by this crate.
#[must_use]
pub fn is_supported_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg"),
        None => false,
    }
}

/// Generate the default output path for an input file.
///
/// PNG inputs stay PNG, everything else becomes JPEG:
/// `"scan.png"` becomes `"scan_clean.png"`, `"photo.jpeg"` becomes
/// `"photo_clean.jpg"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let is_png = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    let ext = if is_png { "png" } else { "jpg" };
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_clean.{ext}"))
}

/// Save an RGBA surface with format-specific handling.
///
/// PNG keeps the alpha channel; JPEG output is flattened to RGB and encoded
/// at the given quality.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &RgbaImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    let format = image::ImageFormat::from_path(path)
        .map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        image::ImageFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let file = std::fs::File::create(path)?;
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(file, jpeg_quality);
            encoder.encode_image(&rgb)?;
        }
        image::ImageFormat::Png => {
            img.save(path)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}
