use std::io::Read;

#[test]
fn test_all() {
    match std::fs::read_dir("./corpus/skip") {
        Err(e) => {
            eprintln!(
                "Failed to open dir: {e}, curr dir: {}",
                std::env::current_dir().unwrap().to_string_lossy()
            );
        }
        Ok(dir) => {
            for entry in dir.flatten() {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if let Ok(mut file) = std::fs::File::open(&path) {
                    let mut buffer = Vec::new();
                    if file.read_to_end(&mut buffer).is_ok() {
                        _ = super::skip_all(&buffer);
                        super::walk_all(&buffer);
                    }
                }
            }
        }
    }
}

#[test]
fn seeds() {
    for data in [
        &[0x82, 0x01, 0x02][..],
        &[0xa1, 0x01, 0x02][..],
        &[0x18][..],
        &[0x9f, 0x01, 0x5f, 0x41, 0x00, 0xff, 0xff][..],
        &[0xc1, 0xc1, 0xf9, 0x3c, 0x00][..],
        &[0xff][..],
    ] {
        _ = super::skip_all(data);
        super::walk_all(data);
    }
    assert_eq!(super::skip_all(&[0x82, 0x01, 0x02]), Ok(3));
}
