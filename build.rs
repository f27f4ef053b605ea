fn main() {
    println!("cargo:rerun-if-env-changed=VERSION");
    let version = std::env::var("VERSION")
        .unwrap_or_else(|_| format!("v{}", std::env::var("CARGO_PKG_VERSION").unwrap_or_default()));
    println!("cargo:rustc-env=VERSION={}", version);
}
