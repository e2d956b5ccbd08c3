use crate::config::{Settings, WriterSettings};
use crate::detections::DetectionFile;
use crate::writer::AnnotationWriter;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "voc_writer", about = "Write detections as a Pascal VOC annotation file")]
pub struct Args {
    /// Detection file (.json) holding filename, size, bboxes and classes.
    pub detections: PathBuf,
    /// Output annotation file. Defaults to the detection file with an `.xml` extension.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Pretty-print with this many spaces per level.
    #[arg(long)]
    pub indent: Option<usize>,
    /// Fail when the number of boxes and class names differ.
    #[arg(long, action, default_value = "false")]
    pub strict: bool,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.detections.with_extension("xml"))
    }

    pub fn writer_settings(&self, configured: &WriterSettings) -> WriterSettings {
        WriterSettings {
            indent: self.indent.or(configured.indent),
            strict_lengths: self.strict || configured.strict_lengths,
            ..configured.clone()
        }
    }
}

pub async fn run(args: Args, settings: Settings) -> anyhow::Result<()> {
    let detections = DetectionFile::from_path(&args.detections)?;
    let writer = AnnotationWriter::new(args.writer_settings(&settings.writer));

    let annotation = writer
        .build(
            &detections.bounding_boxes(),
            &detections.classes,
            &detections.filename,
            detections.image_size(),
        )
        .with_context(|| format!("Invalid detections in {:?}", args.detections))?;

    let output = args.output_path();
    writer.write_async(&annotation, &output).await?;

    tracing::info!(
        indent = ?writer.settings().indent,
        strict_lengths = writer.settings().strict_lengths,
        "Wrote {} objects for {} to {:?}",
        annotation.len(),
        annotation.filename(),
        output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    fn settings() -> Settings {
        Settings {
            log_level: LogLevel::Info,
            writer: WriterSettings::default(),
        }
    }

    #[test]
    fn test_output_path_defaults_to_xml_extension() {
        let args = Args::parse_from(["voc_writer", "data/frame_001.json"]);

        assert_eq!(args.output_path(), PathBuf::from("data/frame_001.xml"));
        assert!(!args.strict);
    }

    #[test]
    fn test_cli_flags_override_configured_writer() {
        let args = Args::parse_from([
            "voc_writer",
            "in.json",
            "--output",
            "out.xml",
            "--indent",
            "4",
            "--strict",
        ]);
        let configured = WriterSettings {
            indent: Some(2),
            xml_declaration: true,
            strict_lengths: false,
        };

        let merged = args.writer_settings(&configured);
        let writer = AnnotationWriter::new(merged.clone());

        assert_eq!(args.output_path(), PathBuf::from("out.xml"));
        assert_eq!(merged.indent, Some(4));
        assert!(merged.strict_lengths);
        assert!(merged.xml_declaration);
        assert_eq!(writer.settings(), &merged);
    }

    #[tokio::test]
    async fn test_run_writes_annotation_next_to_detections() {
        let dir = std::env::temp_dir().join(format!("voc_writer_app_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let detections = dir.join("frame.json");
        std::fs::write(
            &detections,
            r#"{"filename": "frame.jpg", "size": [320, 240, 3],
                "bboxes": [[1, 2, 3, 4], [5, 6, 7, 8]], "classes": ["person", "car"]}"#,
        )
        .unwrap();

        let args = Args::parse_from(["voc_writer", detections.to_str().unwrap()]);
        run(args, settings()).await.unwrap();

        let xml = std::fs::read_to_string(dir.join("frame.xml")).unwrap();
        assert!(xml.contains("<filename>frame.jpg</filename>"));
        assert_eq!(xml.matches("<object>").count(), 2);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_run_strict_rejects_mismatched_detections() {
        let dir =
            std::env::temp_dir().join(format!("voc_writer_app_strict_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let detections = dir.join("frame.json");
        std::fs::write(
            &detections,
            r#"{"filename": "frame.jpg", "size": [320, 240, 3],
                "bboxes": [[1, 2, 3, 4]], "classes": ["person", "car"]}"#,
        )
        .unwrap();

        let args = Args::parse_from(["voc_writer", detections.to_str().unwrap(), "--strict"]);
        let result = run(args, settings()).await;

        assert!(result.is_err());
        assert!(!dir.join("frame.xml").exists());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
