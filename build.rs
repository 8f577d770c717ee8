fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Vendored protoc, so building does not require a system install.
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);

    tonic_build::configure()
        .build_server(false) // The gateway only calls the backend
        .build_client(true)
        .compile_protos(&["proto/todo.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/todo.proto");
    Ok(())
}
