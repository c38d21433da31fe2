pub mod fs_document_store;

pub use fs_document_store::FsDocumentStore;
