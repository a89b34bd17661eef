pub mod contact;
pub mod email_address;
pub mod project;

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hash(pub [u8; 32]);

impl std::fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}

impl std::fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}
