use crate::annotation::Annotation;
use crate::bounding_box::{BoundingBox, ImageSize};
use crate::config::WriterSettings;
use crate::xml;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Failed to write annotation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize annotation: {0}")]
    Serialize(#[from] quick_xml::SeError),
    #[error("Got {bboxes} bounding boxes but {classes} class names")]
    LengthMismatch { bboxes: usize, classes: usize },
    #[error("The {field} {value:?} contains characters not allowed in XML")]
    InvalidText { field: &'static str, value: String },
}

impl AnnotationError {
    fn io(path: &Path, source: io::Error) -> Self {
        AnnotationError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationWriter {
    settings: WriterSettings,
}

impl AnnotationWriter {
    pub fn new(settings: WriterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    pub fn build<S: AsRef<str>>(
        &self,
        bboxes: &[BoundingBox],
        classes: &[S],
        input_filename: &str,
        image_size: ImageSize,
    ) -> Result<Annotation, AnnotationError> {
        if bboxes.len() != classes.len() {
            if self.settings.strict_lengths {
                return Err(AnnotationError::LengthMismatch {
                    bboxes: bboxes.len(),
                    classes: classes.len(),
                });
            }
            tracing::warn!(
                bboxes = bboxes.len(),
                classes = classes.len(),
                "Bounding box and class counts differ, truncating to the shorter list"
            );
        }

        let annotation = Annotation::new(input_filename, image_size, bboxes, classes);
        tracing::debug!(
            filename = input_filename,
            objects = annotation.len(),
            "Built annotation"
        );

        Ok(annotation)
    }

    /// Renders `annotation`. Fails on text that would not form well-formed XML.
    pub fn to_xml(&self, annotation: &Annotation) -> Result<String, AnnotationError> {
        check_text("filename", annotation.filename())?;
        for object in annotation.objects() {
            check_text("class name", object.name())?;
        }

        Ok(xml::to_string(annotation, &self.settings)?)
    }

    /// Writes `annotation` to `path`, replacing any existing file.
    #[instrument(skip(self, annotation), fields(objects = annotation.len()))]
    pub fn write(&self, annotation: &Annotation, path: &Path) -> Result<(), AnnotationError> {
        let document = self.to_xml(annotation)?;

        let file = File::create(path).map_err(|e| AnnotationError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(document.as_bytes())
            .map_err(|e| AnnotationError::io(path, e))?;
        writer.flush().map_err(|e| AnnotationError::io(path, e))?;

        tracing::debug!(bytes = document.len(), "Annotation written");
        Ok(())
    }

    #[instrument(skip(self, annotation), fields(objects = annotation.len()))]
    pub async fn write_async(
        &self,
        annotation: &Annotation,
        path: &Path,
    ) -> Result<(), AnnotationError> {
        let document = self.to_xml(annotation)?;

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| AnnotationError::io(path, e))?;
        file.write_all(document.as_bytes())
            .await
            .map_err(|e| AnnotationError::io(path, e))?;
        file.flush().await.map_err(|e| AnnotationError::io(path, e))?;

        tracing::debug!(bytes = document.len(), "Annotation written");
        Ok(())
    }
}

fn check_text(field: &'static str, value: &str) -> Result<(), AnnotationError> {
    if value.chars().all(xml::is_xml_char) {
        Ok(())
    } else {
        Err(AnnotationError::InvalidText {
            field,
            value: value.to_string(),
        })
    }
}

/// Saves `bboxes` and their `classes` for `input_filename` as a Pascal VOC
/// file at `output_filename`.
///
/// Geometry is not validated. Boxes and classes are paired by position and
/// extra entries of the longer slice are ignored. Text holding characters
/// outside the XML character range is rejected before the file is created.
pub fn write_annotation<S: AsRef<str>, P: AsRef<Path>>(
    bboxes: &[BoundingBox],
    classes: &[S],
    input_filename: &str,
    image_size: ImageSize,
    output_filename: P,
) -> Result<(), AnnotationError> {
    let writer = AnnotationWriter::default();
    let annotation = writer.build(bboxes, classes, input_filename, image_size)?;
    writer.write(&annotation, output_filename.as_ref())
}
