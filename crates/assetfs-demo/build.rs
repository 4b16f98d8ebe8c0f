use assetfs_gen::{generate, Config, OsFs};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let assets = manifest_dir.join("assets");

    let config = Config::new(out_dir.join("assets_vfsdata.rs"))
        .with_module_name("embedded")
        .with_function_doc("Files under `assets/`, embedded at build time.");
    generate(&config, &OsFs::new(&assets))?;

    println!("cargo:rerun-if-changed={}", assets.display());
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
