pub mod actor;
pub mod adlib;
pub mod audio;
pub mod ega;
pub mod image;
pub mod map;
pub mod movie;
pub mod music;
pub mod palette;
pub mod script;
pub mod tile_set;
pub mod voc;
