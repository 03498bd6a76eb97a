use std::{cell::Cell, io::Cursor, rc::Rc};

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "crossfade_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([1u8, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn image_sources_normalize_below_the_root() {
    assert_eq!(normalize_image_source("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_image_source("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_image_source("./a//b.png").unwrap(), "a/b.png");
    assert!(matches!(
        normalize_image_source("   "),
        Err(CrossfadeError::MissingSource(_))
    ));
    assert!(matches!(
        normalize_image_source("/etc/passwd"),
        Err(CrossfadeError::LoadFailure(_))
    ));
    assert!(matches!(
        normalize_image_source("a/../../b.png"),
        Err(CrossfadeError::LoadFailure(_))
    ));
}

#[test]
fn drive_prefixed_and_fileless_sources_fail_to_load() {
    let err = normalize_image_source("C:\\images\\hero.png").unwrap_err();
    assert!(matches!(err, CrossfadeError::LoadFailure(_)));
    assert!(err.to_string().contains("outside the assets root"));

    let err = normalize_image_source("././/").unwrap_err();
    assert!(err.to_string().contains("names no file"));
}

#[test]
fn fs_fetcher_completes_synchronously_and_decodes_once() {
    let tmp = temp_dir("fetch_decode_once");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("img.png"), 3, 2);

    let fetcher = FsImageFetcher::new(&tmp);
    let seen = Rc::new(Cell::new(0u32));
    for _ in 0..2 {
        let s = Rc::clone(&seen);
        fetcher.fetch(
            "img.png",
            Box::new(move |r| {
                let img = r.unwrap();
                assert_eq!((img.width(), img.height()), (3, 2));
                s.set(s.get() + 1);
            }),
        );
        // Completed before `fetch` returned.
    }
    assert_eq!(seen.get(), 2);
    assert_eq!(fetcher.decode_count("img.png"), 1);
    assert_eq!(fetcher.decode_count(".\\img.png"), 1);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn fs_fetcher_reports_missing_and_corrupt_files_as_load_failure() {
    let tmp = temp_dir("fetch_failures");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("broken.png"), b"not a png").unwrap();

    let fetcher = FsImageFetcher::new(&tmp);
    for source in ["missing.png", "broken.png"] {
        let err = fetcher.load(source).unwrap_err();
        assert!(matches!(err, CrossfadeError::LoadFailure(_)), "{source}: {err}");
    }
    assert_eq!(fetcher.decode_count("broken.png"), 0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn memory_fetcher_defers_until_flush() {
    let fetcher = MemoryImageFetcher::deferred();
    fetcher.insert("a", ImageResource::solid(1, 1, [0, 0, 0, 255]).unwrap());

    let ok = Rc::new(Cell::new(false));
    let failed = Rc::new(Cell::new(false));
    let o = Rc::clone(&ok);
    fetcher.fetch("a", Box::new(move |r| o.set(r.is_ok())));
    let f = Rc::clone(&failed);
    fetcher.fetch(
        "b",
        Box::new(move |r| f.set(matches!(r, Err(CrossfadeError::LoadFailure(_))))),
    );

    assert_eq!(fetcher.queued(), 2);
    assert!(!ok.get() && !failed.get());
    assert_eq!(fetcher.flush(), 2);
    assert!(ok.get() && failed.get());
    assert_eq!(fetcher.flush(), 0);
}
