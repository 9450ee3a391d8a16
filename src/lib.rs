//! Remove the NotebookLM badge watermark from images.
//!
//! NotebookLM stamps generated images and PDF pages with a small
//! semi-transparent pill badge at the bottom-right corner (~200x20 px,
//! right-aligned, about 1% from the bottom edge). This crate detects the
//! badge region from the image dimensions alone and removes it either by
//! clone stamping (gradient interpolation against reference bands sampled
//! above and below the badge) or by cropping the bottom strip.
//!
//! # Quick Start
//!
//! ```no_run
//! use unmarklm::{remove_watermark, RemovalMethod};
//!
//! let img = image::open("infographic.png").unwrap().to_rgba8();
//! let result = remove_watermark(&img, RemovalMethod::SmartFill, None);
//! result.image.save("infographic_clean.png").unwrap();
//! ```
//!
//! # Choosing a method
//!
//! Smartfill preserves the image dimensions and only rewrites pixels that
//! mismatch the expected background, so clean background inside the region
//! passes through untouched. Crop trades the bottom strip of the image for a
//! guaranteed result. The [`analyze_complexity`] score (background texture
//! above the badge) can help a caller decide which to suggest.
//!
//! ```no_run
//! use unmarklm::{analyze_complexity, detect_region};
//!
//! let img = image::open("infographic.png").unwrap().to_rgba8();
//! let region = detect_region(img.width(), img.height());
//! let score = analyze_complexity(&img, &region);
//! println!("background complexity: {score:.2}");
//! ```

#![deny(missing_docs)]

pub mod complexity;
pub mod crop;
mod engine;
pub mod error;
pub mod region;
pub mod stamp;

pub use complexity::analyze_complexity;
pub use crop::crop_watermark;
pub use engine::{
    default_output_path, is_supported_file, process_directory, process_file, remove_watermark,
    save_image, ProcessOptions, ProcessResult, RemovalMethod, RemovalResult, MAX_FILE_SIZE,
};
pub use error::{Error, Result};
pub use region::{detect_region, WatermarkRegion};
pub use stamp::clone_stamp;
