//! Build script for pagecell-ffi
//!
//! Generates the C header with cbindgen so foreign callers can consume the
//! bridge surface.

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/stub.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let crate_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let output_dir = std::path::Path::new(&crate_dir).join("include");
    if std::fs::create_dir_all(&output_dir).is_err() {
        eprintln!("cbindgen: could not create include directory, header not generated");
        return;
    }

    let header_path = output_dir.join("pagecell.h");

    let config = match cbindgen::Config::from_file("cbindgen.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cbindgen: failed to load cbindgen.toml: {e:?}");
            return;
        }
    };

    // Header generation failures must not fail the build.
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&header_path);
        }
        Err(e) => {
            eprintln!("cbindgen: header not generated: {e:?}");
        }
    }
}
