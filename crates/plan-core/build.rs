// File: crates/plan-core/build.rs
// Summary: Links the Windows system library Skia's font manager needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used by the DirectWrite font lookup
        println!("cargo:rustc-link-lib=advapi32");
    }
}
