mod atomic_write;
pub mod file_header;
pub mod save_codec;
pub mod save_data;
pub mod save_error;
pub mod save_file;
mod save_plugin;


pub use save_codec::{
    decode_binary, decode_json, decode_save, detect_format, encode_binary, encode_json,
    encode_save, SaveFormat,
};
pub use save_data::{SaveData, CURRENT_SAVE_VERSION};
pub use save_error::SaveError;
pub use save_file::{read_save_file, write_save_file};
pub use save_plugin::{LoadGameEvent, SaveGameEvent, SavePlugin, SaveSlot};
