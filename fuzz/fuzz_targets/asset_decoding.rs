#![no_main]

use libfuzzer_sys::fuzz_target;
use mnidev::resources::types::{
    actor::ActorInfo, movie::Movie, music::Song, script::ScriptBundle, tile_set::TileSet,
    voc::decode_voc,
};

fuzz_target!(|data: &[u8]| {
    let _ = decode_voc(data);
    let _ = TileSet::from_czone(data);
    let _ = Song::from_bytes(data);
    let _ = Movie::from_bytes(data);
    let _ = ScriptBundle::parse(&String::from_utf8_lossy(data));
    if let Ok(info) = ActorInfo::from_bytes(data) {
        for header in info.actor_ids().filter_map(|id| info.header(id)) {
            for frame in header.frames() {
                let _ = frame.decode_image(data);
            }
        }
    }
});
