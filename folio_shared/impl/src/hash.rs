use folio_di::Build;
use folio_models::Sha256Hash;
use folio_shared_contracts::hash::HashService;
use folio_utils::trace_instrument;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, Build)]
pub struct HashServiceImpl;

impl HashService for HashServiceImpl {
    #[trace_instrument(skip(self, data))]
    fn sha256(&self, data: &[u8]) -> Sha256Hash {
        Sha256Hash(Sha256::new().chain_update(data).finalize().into())
    }
}
