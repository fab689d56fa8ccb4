use bucketform_core::{
    BucketDocument, DEFAULT_CACHE_CONTROL, ExcludeRule, ExcludeSet, GenerateConfig,
    ObjectDescriptor, ResourceId, ScanError, ScanWarning, WarningKind, etag_expression,
};
use std::collections::BTreeMap;

fn descriptor(key: &str, source: &str) -> ObjectDescriptor {
    ObjectDescriptor {
        bucket: "mybucket".to_string(),
        cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        content_type: "text/plain; charset=utf-8".to_string(),
        etag: etag_expression(source),
        key: key.to_string(),
        last_modified: "Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
        source: source.to_string(),
    }
}

#[test]
fn test_document_shape() {
    let mut objects = BTreeMap::new();
    objects.insert(
        ResourceId::from_bytes(b"a/b.txt"),
        descriptor("a/b.txt", "/srv/a/b.txt"),
    );
    let doc = BucketDocument::from_objects(objects);

    let mut out = Vec::new();
    doc.write_json(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.ends_with("}\n"));
    assert_eq!(text.matches('\n').count(), 1);

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let object = &json["resource"]["aws_s3_bucket_object"]
        ["09a62d2dcd900b1d2da88021afb07884731b8656"];
    assert_eq!(object["bucket"], "mybucket");
    assert_eq!(object["key"], "a/b.txt");
    assert_eq!(object["source"], "/srv/a/b.txt");
    assert_eq!(object["etag"], "${md5(file(\"/srv/a/b.txt\"))}");
    assert_eq!(
        object["cache_control"],
        "max-age=86400, stale-while-revalidate=3600"
    );
}

#[test]
fn test_collision_overwrites() {
    let id = ResourceId::from_bytes(b"same");
    let mut objects = BTreeMap::new();
    objects.insert(id.clone(), descriptor("same", "/first"));
    objects.insert(id.clone(), descriptor("same", "/second"));

    let doc = BucketDocument::from_objects(objects);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.resource.bucket_objects[&id].source, "/second");
}

#[test]
fn test_exclude_set_in_config() {
    let config = GenerateConfig::builder()
        .root("/srv/site")
        .bucket("mybucket")
        .exclude(ExcludeSet::from_patterns(["node_modules", "drafts/*.md", "*.bak"]).unwrap())
        .build()
        .unwrap();

    assert_eq!(config.exclude.len(), 3);
    assert!(matches!(
        config.exclude.first_match("drafts/post.md"),
        Some(ExcludeRule::FullPath(_))
    ));

    assert!(config.exclude.first_match("lib/node_modules/x.js").is_some());
    assert!(config.exclude.first_match("drafts/post.md").is_some());
    assert!(config.exclude.first_match("posts/drafts/post.md").is_none());
    assert!(config.exclude.first_match("posts/old.bak").is_some());
    assert!(config.exclude.first_match("posts/new.md").is_none());
}

#[test]
fn test_character_class_and_question_mark() {
    let set = ExcludeSet::from_patterns(["file?.[ch]"]).unwrap();
    assert!(set.first_match("src/file1.c").is_some());
    assert!(set.first_match("file2.h").is_some());
    assert!(set.first_match("file10.c").is_none());
    assert!(set.first_match("file1.rs").is_none());
}

#[test]
fn test_invalid_pattern_error_message() {
    let err = ExcludeSet::from_patterns(["[oops"]).unwrap_err();
    assert!(matches!(err, ScanError::InvalidPattern { .. }));
    assert!(err.to_string().contains("[oops"));
}

#[test]
fn test_warning_lines() {
    let warning = ScanWarning::new("/srv/x", "not below the scan root", WarningKind::RelativePath);
    assert_eq!(
        warning.to_string(),
        "Failed to make relative /srv/x: not below the scan root"
    );

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
    assert_eq!(
        ScanWarning::broken_symlink("/srv/link", &io).to_string(),
        "Failed to resolve symlink /srv/link: No such file or directory"
    );
    assert_eq!(
        ScanWarning::metadata_error("/srv/f", &io).to_string(),
        "Error reading stats /srv/f: No such file or directory"
    );
    assert_eq!(
        ScanWarning::read_error("/srv/f", &io).to_string(),
        "Error reading /srv/f: No such file or directory"
    );
}
