use std::sync::LazyLock;

use folio_models::Sha256Hash;

pub mod contact;
pub mod project;

pub const SHA256HASH1_HEX: &str =
    "4a1df3d808c2fe0882ec627549102fa62ca4357ac00874e2d9754b98b34e5ad6";

pub static SHA256HASH1: LazyLock<Sha256Hash> = LazyLock::new(|| sha256hash(SHA256HASH1_HEX));

fn sha256hash(hash: &str) -> Sha256Hash {
    Sha256Hash(hex::decode(hash).unwrap().try_into().unwrap())
}
