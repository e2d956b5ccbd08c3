//! Pascal VOC annotation writer.
//!
//! Turns detector output (bounding boxes plus class names for one image)
//! into a Pascal VOC XML file.
//!
//! ```no_run
//! use voc_writer::{write_annotation, BoundingBox};
//!
//! let bboxes = [BoundingBox::from([80, 700, 100, 750])];
//! write_annotation(&bboxes, &["cat"], "img.jpg", (512, 512, 3).into(), "img.xml").unwrap();
//! ```

mod annotation;
mod bounding_box;
mod xml;

pub mod app;
pub mod config;
pub mod detections;
pub mod writer;

pub use annotation::{AnnotatedObject, Annotation};
pub use bounding_box::{BoundingBox, ImageSize, LabeledBox};
pub use writer::{write_annotation, AnnotationError, AnnotationWriter};
