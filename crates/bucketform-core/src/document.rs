//! Terraform JSON document wrapping the generated objects.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::object::{ObjectDescriptor, ResourceId};

/// Top-level document: `{"resource":{"aws_s3_bucket_object":{...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDocument {
    pub resource: ResourceBlock,
}

/// The `resource` block, holding one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBlock {
    /// Objects keyed by resource name. Sorted, so output is stable.
    #[serde(rename = "aws_s3_bucket_object")]
    pub bucket_objects: BTreeMap<ResourceId, ObjectDescriptor>,
}

impl BucketDocument {
    /// Wrap a set of objects.
    pub fn from_objects(objects: BTreeMap<ResourceId, ObjectDescriptor>) -> Self {
        Self {
            resource: ResourceBlock {
                bucket_objects: objects,
            },
        }
    }

    /// Number of objects in the document.
    pub fn len(&self) -> usize {
        self.resource.bucket_objects.len()
    }

    /// Check if the document declares no objects.
    pub fn is_empty(&self) -> bool {
        self.resource.bucket_objects.is_empty()
    }

    /// Write the document as compact JSON followed by a newline.
    pub fn write_json<W: Write>(&self, mut writer: W) -> io::Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
