#![no_main]

use libfuzzer_sys::fuzz_target;
use mnidev::resources::file::CmpArchive;

fuzz_target!(|data: &[u8]| {
    let Ok(archive) = CmpArchive::from_bytes(data.to_vec()) else {
        return;
    };
    for (name, size) in archive.entries() {
        let contents = archive.file(name).unwrap();
        assert!(contents.len() == size || archive.file_names().filter(|n| *n == name).count() > 1);
    }
});
