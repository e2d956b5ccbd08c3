use crate::bounding_box::{BoundingBox, ImageSize, LabeledBox};
use serde::Serialize;

#[cfg(test)]
use serde::Deserialize;

pub const FOLDER_PLACEHOLDER: &str = "folder";

/// Pascal VOC document for a single image.
///
/// Built once from the detection results and never mutated afterwards;
/// element order follows field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename = "annotation")]
pub struct Annotation {
    folder: String,
    filename: String,
    size: SizeElement,
    #[serde(rename = "object", default)]
    objects: Vec<AnnotatedObject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct SizeElement {
    width: u32,
    height: u32,
    depth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct AnnotatedObject {
    name: String,
    difficult: u8,
    truncated: u8,
    bndbox: BndBoxElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct BndBoxElement {
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
}

impl From<BoundingBox> for BndBoxElement {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            xmin: bbox.xmin,
            ymin: bbox.ymin,
            xmax: bbox.xmax,
            ymax: bbox.ymax,
        }
    }
}

impl AnnotatedObject {
    fn new(bbox: BoundingBox, class_label: &str) -> Self {
        Self {
            name: class_label.to_string(),
            difficult: 0,
            truncated: 0,
            bndbox: bbox.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bbox(&self) -> BoundingBox {
        let b = self.bndbox;
        BoundingBox::new(b.xmin, b.ymin, b.xmax, b.ymax)
    }

    pub fn is_difficult(&self) -> bool {
        self.difficult != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated != 0
    }
}

impl Annotation {
    /// Pairs `bboxes` and `classes` by position. When the lengths differ the
    /// extra entries of the longer slice are dropped.
    pub fn new<S: AsRef<str>>(
        input_filename: &str,
        image_size: ImageSize,
        bboxes: &[BoundingBox],
        classes: &[S],
    ) -> Self {
        let objects = bboxes
            .iter()
            .zip(classes)
            .map(|(bbox, class_label)| AnnotatedObject::new(*bbox, class_label.as_ref()))
            .collect();

        Self {
            folder: FOLDER_PLACEHOLDER.to_string(),
            filename: input_filename.to_string(),
            size: SizeElement {
                width: image_size.width,
                height: image_size.height,
                depth: image_size.channels,
            },
            objects,
        }
    }

    pub fn from_labeled_boxes(
        input_filename: &str,
        image_size: ImageSize,
        labeled: &[LabeledBox],
    ) -> Self {
        let bboxes: Vec<BoundingBox> = labeled.iter().map(|l| l.bbox).collect();
        let classes: Vec<&str> = labeled.iter().map(|l| l.class_label.as_str()).collect();
        Self::new(input_filename, image_size, &bboxes, &classes)
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.size.width, self.size.height, self.size.depth)
    }

    pub fn objects(&self) -> &[AnnotatedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn labeled_boxes(&self) -> impl Iterator<Item = LabeledBox> + '_ {
        self.objects.iter().map(|object| LabeledBox {
            bbox: object.bbox(),
            class_label: object.name.clone(),
        })
    }
}
