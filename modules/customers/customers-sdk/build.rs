//! `Customer.accounts` reuses the account message generated by `accounts-sdk`.

const ACCOUNTS_PROTO_ROOT: &str = "../../accounts/accounts-sdk/proto";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/bankline/customers/v1/customers.proto");
    println!("cargo:rerun-if-changed=proto");
    println!("cargo:rerun-if-changed={ACCOUNTS_PROTO_ROOT}");

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .extern_path(".bankline.accounts.v1", "::accounts_sdk::proto")
        .compile_protos(&["proto/bankline/customers/v1/customers.proto"], &["proto", ACCOUNTS_PROTO_ROOT])?;

    Ok(())
}
