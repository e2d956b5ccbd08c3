use crate::bounding_box::{BoundingBox, ImageSize};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionFileError {
    #[error("Failed to read detection file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse detection file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum SizeSpec {
    Triple([u32; 3]),
    Named { width: u32, height: u32, depth: u32 },
}

/// Detector output for one image, as written by the inference pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct DetectionFile {
    pub filename: String,
    pub size: SizeSpec,
    #[serde(default)]
    pub bboxes: Vec<[i32; 4]>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl DetectionFile {
    pub fn from_path(path: &Path) -> Result<Self, DetectionFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DetectionFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| DetectionFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn bounding_boxes(&self) -> Vec<BoundingBox> {
        self.bboxes.iter().copied().map(BoundingBox::from).collect()
    }

    pub fn image_size(&self) -> ImageSize {
        match self.size {
            SizeSpec::Triple(dims) => dims.into(),
            SizeSpec::Named {
                width,
                height,
                depth,
            } => ImageSize::new(width, height, depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_size() {
        let file: DetectionFile = serde_json::from_str(
            r#"{
                "filename": "img.jpg",
                "size": [512, 512, 3],
                "bboxes": [[80, 700, 100, 750]],
                "classes": ["cat"]
            }"#,
        )
        .unwrap();

        assert_eq!(file.image_size(), ImageSize::new(512, 512, 3));
        assert_eq!(
            file.bounding_boxes(),
            vec![BoundingBox::new(80, 700, 100, 750)]
        );
        assert_eq!(file.classes, vec!["cat".to_string()]);
    }

    #[test]
    fn test_parse_named_size_without_detections() {
        let file: DetectionFile = serde_json::from_str(
            r#"{"filename": "img.jpg", "size": {"width": 640, "height": 480, "depth": 1}}"#,
        )
        .unwrap();

        assert_eq!(file.image_size(), ImageSize::new(640, 480, 1));
        assert!(file.bounding_boxes().is_empty());
        assert!(file.classes.is_empty());
    }

    #[test]
    fn test_from_path_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "voc_writer_bad_detections_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let result = DetectionFile::from_path(&path);
        assert!(matches!(result, Err(DetectionFileError::Parse { .. })));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let path = Path::new("/nonexistent/voc_writer/detections.json");

        let result = DetectionFile::from_path(path);
        assert!(matches!(result, Err(DetectionFileError::Io { .. })));
    }
}
