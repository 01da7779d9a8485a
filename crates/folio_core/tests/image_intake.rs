use folio_core::service::image_intake::{
    classify_reference, reference_from_file, reference_from_url, ImageReferenceKind,
    FILE_TOO_LARGE_MESSAGE, MAX_IMAGE_FILE_BYTES,
};
use folio_core::{
    ContentStore, ImageIntakeError, ManualClock, MemoryKvStore, ProfileUpdate,
};

#[test]
fn url_input_is_kept_verbatim() {
    let url = " https://example.com/a b.png ";
    assert_eq!(reference_from_url(url), url);
}

#[test]
fn file_at_ceiling_is_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("avatar.png");
    std::fs::write(&path, vec![0u8; MAX_IMAGE_FILE_BYTES as usize]).unwrap();

    let reference = reference_from_file(&path).unwrap();

    assert!(reference.starts_with("data:image/png;base64,"));
    assert_eq!(classify_reference(&reference), ImageReferenceKind::Embedded);
}

#[test]
fn file_over_ceiling_is_rejected_with_user_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.jpg");
    std::fs::write(&path, vec![0u8; MAX_IMAGE_FILE_BYTES as usize + 1]).unwrap();

    let err = reference_from_file(&path).unwrap_err();

    assert!(matches!(
        err,
        ImageIntakeError::TooLarge { size_bytes, max_bytes }
            if size_bytes == MAX_IMAGE_FILE_BYTES + 1 && max_bytes == MAX_IMAGE_FILE_BYTES
    ));
    assert_eq!(err.to_string(), FILE_TOO_LARGE_MESSAGE);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = reference_from_file(dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(err, ImageIntakeError::Io { .. }));
}

#[test]
fn store_accepts_oversized_reference_handed_to_it_directly() {
    let mut store = ContentStore::with_storage(MemoryKvStore::new(), ManualClock::new(0));
    let oversized = format!("data:image/png;base64,{}", "A".repeat(1_200_000));

    store.update_profile(ProfileUpdate {
        avatar_url: Some(oversized.clone()),
        ..ProfileUpdate::default()
    });

    assert_eq!(store.data().profile.avatar_url, oversized);
}
