//! The `assets/` directory of this crate, embedded gzip-compressed by
//! `build.rs` and read back through [`assetfs::AssetFs`].
//!
//! ```
//! use std::io::Read;
//!
//! let fs = assetfs_demo::assets();
//! let mut file = fs.open("/a.txt").unwrap();
//! let mut text = String::new();
//! file.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "hello");
//! ```

include!(concat!(env!("OUT_DIR"), "/assets_vfsdata.rs"));

pub use embedded::assets;
