//! Build script for unitkit-au.
//!
//! Links the Apple frameworks the backend calls into.

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    if target_os == "macos" || target_os == "ios" {
        println!("cargo:rustc-link-lib=framework=AudioToolbox");
        println!("cargo:rustc-link-lib=framework=CoreAudio");
        println!("cargo:rustc-link-lib=framework=CoreFoundation");
        println!("cargo:rustc-link-lib=framework=Foundation");
    }

    if target_os == "macos" {
        // AUGenericView and the AUCocoaUIBase protocol
        println!("cargo:rustc-link-lib=framework=CoreAudioKit");
        println!("cargo:rustc-link-lib=framework=AppKit");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
