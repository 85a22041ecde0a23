//! Build script for c4log-relay
//!
//! Without the `litecore` feature there is nothing to link and this script
//! does nothing. With it, LiteCore is linked from a prebuilt directory
//! (`COUCHBASE_LITE_CORE_BUILD_DIR`) or, with the `build` feature, compiled
//! from source (`COUCHBASE_LITE_CORE_SRC_DIR`) using CMake.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_LITECORE").is_none() {
        return;
    }

    let build_dir = litecore_build_dir();
    println!("cargo:warning=Linking LiteCore from: {}", build_dir.display());

    println!("cargo:rustc-link-search=native={}", build_dir.display());
    println!("cargo:rustc-link-search=native={}/lib", build_dir.display());
    println!("cargo:rustc-link-lib=dylib=LiteCore");

    // LiteCore needs the C++ runtime of the target platform
    match env::var("CARGO_CFG_TARGET_OS").as_deref() {
        Ok("linux") | Ok("android") => println!("cargo:rustc-link-lib=dylib=stdc++"),
        Ok("macos") | Ok("ios") => println!("cargo:rustc-link-lib=dylib=c++"),
        _ => {}
    }
}

#[cfg(not(feature = "build"))]
fn litecore_build_dir() -> PathBuf {
    println!("cargo:rerun-if-env-changed=COUCHBASE_LITE_CORE_BUILD_DIR");
    match env::var("COUCHBASE_LITE_CORE_BUILD_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => panic!(
            "\nCOUCHBASE_LITE_CORE_BUILD_DIR must point at a LiteCore build when the \
             `litecore` feature is enabled\n"
        ),
    }
}

#[cfg(feature = "build")]
fn litecore_build_dir() -> PathBuf {
    println!("cargo:rerun-if-env-changed=COUCHBASE_LITE_CORE_SRC_DIR");
    let src_dir = match env::var("COUCHBASE_LITE_CORE_SRC_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => panic!(
            "\nCOUCHBASE_LITE_CORE_SRC_DIR must point at a couchbase-lite-core checkout \
             when the `build` feature is enabled\n"
        ),
    };
    println!("cargo:warning=Building LiteCore from: {}", src_dir.display());

    // Build only the shared LiteCore library (no tests, no LTO)
    let dst = cmake::Config::new(&src_dir)
        .define("DISABLE_LTO_BUILD", "True")
        .define("ENABLE_TESTING", "False")
        .define("LITECORE_BUILD_TESTS", "False")
        .build_target("LiteCore")
        .profile("Release")
        .build();

    dst.join("build")
}
