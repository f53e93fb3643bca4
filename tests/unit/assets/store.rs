use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "seqview_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &std::path::Path, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_raw(2, 2, rgba.repeat(4)).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn cache_evicts_oldest_when_full() {
    let tmp = temp_dir("store_evict");
    std::fs::create_dir_all(&tmp).unwrap();
    let paths: Vec<PathBuf> = (0..3)
        .map(|i| {
            let p = tmp.join(format!("f{i}.png"));
            write_png(&p, [i as u8, 0, 0, 255]);
            p
        })
        .collect();

    let mut store = FsFrameStore::new(paths, 2);
    store.load(FrameIndex(0)).unwrap();
    store.load(FrameIndex(1)).unwrap();
    store.load(FrameIndex(2)).unwrap();
    assert_eq!(store.cached_len(), 2);

    // frame 0 was evicted, so it decodes again
    store.load(FrameIndex(0)).unwrap();
    assert_eq!(store.decode_count(FrameIndex(0)), 2);
    assert_eq!(store.decode_count(FrameIndex(2)), 1);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn out_of_range_is_validation_error() {
    let mut store = FsFrameStore::new(vec![PathBuf::from("a.png")], 4);
    let err = store.load(FrameIndex(1)).unwrap_err();
    assert!(matches!(err, SeqviewError::Validation(_)));
    assert_eq!(store.decode_count(FrameIndex(7)), 0);
    assert!(store.path(FrameIndex(1)).is_none());
}

#[test]
fn missing_file_is_decode_error_and_not_cached() {
    let mut store = FsFrameStore::new(vec![PathBuf::from("missing/frame.png")], 4);
    assert!(store.load(FrameIndex(0)).unwrap_err().is_decode());
    assert_eq!(store.cached_len(), 0);
    assert_eq!(store.decode_count(FrameIndex(0)), 0);
}
